use std::{
    env, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

/// Which components this process runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Service on a background task plus the bot (default).
    All,
    /// HTTP classification service only.
    Service,
    /// Bot only, talking to a service at `SERVICE_URL`.
    Bot,
}

impl RunMode {
    pub fn runs_bot(self) -> bool {
        matches!(self, RunMode::All | RunMode::Bot)
    }

    pub fn runs_service(self) -> bool {
        matches!(self, RunMode::All | RunMode::Service)
    }
}

/// Classification strategy the service is started with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifierKind {
    Substring,
    Dictionary,
}

/// Typed configuration, read from the environment (plus an optional `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub run_mode: RunMode,

    // Telegram
    pub telegram_bot_token: Option<String>,
    pub telegram_safe_limit: usize,

    // Shared secret between bot and service
    pub api_key: String,

    // Service
    pub service_bind: SocketAddr,
    pub service_url: String,
    pub service_timeout: Duration,
    pub classifier: ClassifierKind,
    pub classifier_table: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process env in
    /// production, a map in tests).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let run_mode = match get("RUN_MODE").and_then(non_empty) {
            None => RunMode::All,
            Some(v) => parse_run_mode(&v)?,
        };

        let telegram_bot_token = get("TELEGRAM_BOT_TOKEN").and_then(non_empty);
        if run_mode.runs_bot() && telegram_bot_token.is_none() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let Some(api_key) = get("API_KEY").and_then(non_empty) else {
            return Err(Error::Config(
                "API_KEY environment variable is required".to_string(),
            ));
        };

        let service_bind = match get("SERVICE_BIND").and_then(non_empty) {
            None => SocketAddr::from(([127, 0, 0, 1], 8000)),
            Some(v) => v.trim().parse::<SocketAddr>().map_err(|e| {
                Error::Config(format!("SERVICE_BIND is not a socket address ({v}): {e}"))
            })?,
        };
        let service_url = get("SERVICE_URL")
            .and_then(non_empty)
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://{service_bind}"));

        let service_timeout = Duration::from_millis(
            parse_u64(get("SERVICE_TIMEOUT_MS"))
                .unwrap_or(10_000)
                .max(1),
        );

        let classifier = match get("CLASSIFIER").and_then(non_empty) {
            None => ClassifierKind::Substring,
            Some(v) => parse_classifier(&v)?,
        };
        let classifier_table = get("CLASSIFIER_TABLE").and_then(non_empty).map(PathBuf::from);

        let telegram_safe_limit = parse_u64(get("TELEGRAM_SAFE_LIMIT"))
            .map(|v| v as usize)
            .unwrap_or(4000)
            .clamp(200, 4096);

        Ok(Self {
            run_mode,
            telegram_bot_token,
            telegram_safe_limit,
            api_key,
            service_bind,
            service_url,
            service_timeout,
            classifier,
            classifier_table,
        })
    }
}

fn parse_run_mode(v: &str) -> Result<RunMode> {
    match v.trim().to_lowercase().as_str() {
        "all" => Ok(RunMode::All),
        "service" => Ok(RunMode::Service),
        "bot" => Ok(RunMode::Bot),
        other => Err(Error::Config(format!(
            "RUN_MODE must be one of all, service, bot (got {other})"
        ))),
    }
}

fn parse_classifier(v: &str) -> Result<ClassifierKind> {
    match v.trim().to_lowercase().as_str() {
        "substring" => Ok(ClassifierKind::Substring),
        "dictionary" => Ok(ClassifierKind::Dictionary),
        other => Err(Error::Config(format!(
            "CLASSIFIER must be substring or dictionary (got {other})"
        ))),
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, unquote(v.trim()));
    }
}

/// Strip optional surrounding quotes.
fn unquote(val: &str) -> &str {
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        &val[1..val.len() - 1]
    } else {
        val
    }
}

fn parse_u64(v: Option<String>) -> Option<u64> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
