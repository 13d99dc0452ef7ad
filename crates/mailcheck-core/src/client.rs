use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    errors::Error,
    ports::CheckService,
    wire::{CheckRequest, CheckResults, API_KEY_HEADER, CHECK_EMAILS_PATH, STATUS_PATH},
    Result,
};

const MAX_ERROR_BODY_CHARS: usize = 200;

/// `CheckService` over HTTP (reqwest).
///
/// Every call is bounded by the client-wide timeout; a timeout surfaces as
/// `Error::Timeout`. No retries.
#[derive(Clone, Debug)]
pub struct HttpCheckService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCheckService {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl CheckService for HttpCheckService {
    async fn status(&self) -> Result<()> {
        let resp = self.http.get(self.url(STATUS_PATH)).send().await?;
        ensure_success(resp).await.map(|_| ())
    }

    async fn check(&self, emails: &[String]) -> Result<CheckResults> {
        let body = CheckRequest {
            emails: emails.to_vec(),
        };
        let resp = self
            .http
            .post(self.url(CHECK_EMAILS_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let resp = ensure_success(resp).await?;
        Ok(resp.json::<CheckResults>().await?)
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Unauthorized);
    }

    let body = resp.text().await.unwrap_or_default();
    let body = if body.chars().count() > MAX_ERROR_BODY_CHARS {
        format!(
            "{}...",
            body.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>()
        )
    } else {
        body
    };
    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}
