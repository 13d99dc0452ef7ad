//! JSON bodies exchanged between the bot and the classification service.

use std::{collections::HashMap, fmt};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::label::StatusLabel;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const STATUS_PATH: &str = "/status";
pub const CHECK_EMAILS_PATH: &str = "/check_emails";

/// `POST /check_emails` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub emails: Vec<String>,
}

/// `GET /status` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// One classified address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub email: String,
    pub label: StatusLabel,
}

/// `POST /check_emails` response: a JSON object `{email: label}`.
///
/// Entry order is kept on both encode and decode, so the bot can render
/// results in the order the service produced them. Lookups go through an
/// email → position index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckResults {
    verdicts: Vec<Verdict>,
    index: HashMap<String, usize>,
}

impl CheckResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            verdicts: Vec::with_capacity(n),
            index: HashMap::with_capacity(n),
        }
    }

    /// Adds an entry unless the email is already present (first one wins).
    pub fn insert(&mut self, email: impl Into<String>, label: StatusLabel) -> bool {
        let email = email.into();
        if self.index.contains_key(&email) {
            return false;
        }
        self.index.insert(email.clone(), self.verdicts.len());
        self.verdicts.push(Verdict { email, label });
        true
    }

    pub fn get(&self, email: &str) -> Option<StatusLabel> {
        self.index.get(email).map(|&i| self.verdicts[i].label)
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter()
    }

    pub fn into_verdicts(self) -> Vec<Verdict> {
        self.verdicts
    }
}

impl FromIterator<(String, StatusLabel)> for CheckResults {
    fn from_iter<I: IntoIterator<Item = (String, StatusLabel)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = CheckResults::with_capacity(iter.size_hint().0);
        for (email, label) in iter {
            out.insert(email, label);
        }
        out
    }
}

impl Serialize for CheckResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.verdicts.len()))?;
        for v in &self.verdicts {
            map.serialize_entry(&v.email, &v.label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CheckResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultsVisitor;

        impl<'de> Visitor<'de> for ResultsVisitor {
            type Value = CheckResults;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping email addresses to status labels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = CheckResults::with_capacity(access.size_hint().unwrap_or(0).min(4096));
                while let Some((email, label)) = access.next_entry::<String, StatusLabel>()? {
                    out.insert(email, label);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(ResultsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_keep_service_order() {
        let body = r#"{"z@x.io":"no","a@x.io":"yes","m@x.io":"captcha"}"#;
        let results: CheckResults = serde_json::from_str(body).unwrap();
        let emails: Vec<&str> = results.iter().map(|v| v.email.as_str()).collect();
        assert_eq!(emails, vec!["z@x.io", "a@x.io", "m@x.io"]);
        assert_eq!(serde_json::to_string(&results).unwrap(), body);
    }

    #[test]
    fn duplicate_emails_keep_first_label() {
        let mut results = CheckResults::new();
        assert!(results.insert("a@x.io", StatusLabel::Flagged));
        assert!(!results.insert("a@x.io", StatusLabel::Active));
        assert_eq!(results.len(), 1);
        assert_eq!(results.get("a@x.io"), Some(StatusLabel::Flagged));
    }

    #[test]
    fn large_batches_keep_order_and_lookups() {
        let n = 50_000;
        let mut results: CheckResults = (0..n)
            .map(|i| (format!("user{i}@x.io"), StatusLabel::Active))
            .collect();
        assert_eq!(results.len(), n);
        assert!(!results.insert("user0@x.io", StatusLabel::Flagged));
        assert_eq!(results.get("user0@x.io"), Some(StatusLabel::Active));
        assert_eq!(results.get(&format!("user{}@x.io", n - 1)), Some(StatusLabel::Active));
        assert_eq!(results.get("missing@x.io"), None);

        let body = serde_json::to_string(&results).unwrap();
        let decoded: CheckResults = serde_json::from_str(&body).unwrap();
        let emails: Vec<String> = decoded.into_verdicts().into_iter().map(|v| v.email).collect();
        assert_eq!(emails.len(), n);
        assert_eq!(emails[0], "user0@x.io");
        assert_eq!(emails[n - 1], format!("user{}@x.io", n - 1));
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert!(serde_json::from_str::<CheckResults>(r#"["a@x.io"]"#).is_err());
        assert!(serde_json::from_str::<CheckResults>(r#"{"a@x.io": 1}"#).is_err());
        assert!(serde_json::from_str::<CheckResults>(r#"{"error":"Unauthorized"}"#).is_ok());
    }

    #[test]
    fn status_body_shape() {
        assert_eq!(
            serde_json::to_value(StatusResponse::ok()).unwrap(),
            serde_json::json!({"status": "ok"})
        );
    }
}
