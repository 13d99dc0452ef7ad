//! Classification strategies.
//!
//! The service only knows the `Classifier` trait; swapping in a real
//! verification backend means adding an implementation here (or in another
//! crate) and injecting it, without touching the wire contract.

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use async_trait::async_trait;

use crate::{
    config::{ClassifierKind, Config},
    label::StatusLabel,
    Result,
};

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Classify one address exactly as submitted.
    ///
    /// An `Err` means "could not classify"; the service reports it as
    /// `StatusLabel::Unknown` for that address only.
    async fn classify(&self, email: &str) -> Result<StatusLabel>;
}

/// Matches on fragments of the literal address text.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubstringClassifier;

#[async_trait]
impl Classifier for SubstringClassifier {
    fn name(&self) -> &'static str {
        "substring"
    }

    async fn classify(&self, email: &str) -> Result<StatusLabel> {
        let label = if email.contains("flag") {
            StatusLabel::Flagged
        } else if email.contains("active") {
            StatusLabel::Active
        } else {
            StatusLabel::Unknown
        };
        Ok(label)
    }
}

/// Lowercased exact lookup in a fixed table.
#[derive(Clone, Debug)]
pub struct DictionaryClassifier {
    table: HashMap<String, StatusLabel>,
    default: StatusLabel,
}

impl DictionaryClassifier {
    pub fn new(
        entries: impl IntoIterator<Item = (String, StatusLabel)>,
        default: StatusLabel,
    ) -> Self {
        let table = entries
            .into_iter()
            .map(|(email, label)| (email.to_lowercase(), label))
            .collect();
        Self { table, default }
    }

    /// The built-in fixture table. Unlisted addresses count as active.
    pub fn reference() -> Self {
        Self::new(
            [
                ("active@example.com", StatusLabel::Flagged),
                ("flagged@example.com", StatusLabel::Active),
                ("blocked@example.com", StatusLabel::CaptchaBlocked),
                ("error@example.com", StatusLabel::Unknown),
            ]
            .map(|(e, l)| (e.to_string(), l)),
            StatusLabel::Active,
        )
    }

    /// Load a table from a JSON object of `{"email": "<wire label>"}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let table: HashMap<String, StatusLabel> = serde_json::from_str(&raw)?;
        Ok(Self::new(table, StatusLabel::Active))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[async_trait]
impl Classifier for DictionaryClassifier {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    async fn classify(&self, email: &str) -> Result<StatusLabel> {
        Ok(self
            .table
            .get(&email.to_lowercase())
            .copied()
            .unwrap_or(self.default))
    }
}

/// Build the strategy selected by `CLASSIFIER` / `CLASSIFIER_TABLE`.
pub fn from_config(cfg: &Config) -> Result<Arc<dyn Classifier>> {
    let classifier: Arc<dyn Classifier> = match cfg.classifier {
        ClassifierKind::Substring => Arc::new(SubstringClassifier),
        ClassifierKind::Dictionary => match &cfg.classifier_table {
            Some(path) => Arc::new(DictionaryClassifier::from_json_file(path)?),
            None => Arc::new(DictionaryClassifier::reference()),
        },
    };
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn substring_rules() {
        let c = SubstringClassifier;
        assert_eq!(c.classify("redflag@x.io").await.unwrap(), StatusLabel::Flagged);
        assert_eq!(c.classify("active@x.io").await.unwrap(), StatusLabel::Active);
        // "flag" wins when both fragments are present.
        assert_eq!(c.classify("flag.active@x.io").await.unwrap(), StatusLabel::Flagged);
        assert_eq!(c.classify("someone@x.io").await.unwrap(), StatusLabel::Unknown);
        // Literal text, no case folding.
        assert_eq!(c.classify("FLAG@x.io").await.unwrap(), StatusLabel::Unknown);
    }

    #[tokio::test]
    async fn dictionary_reference_table() {
        let c = DictionaryClassifier::reference();
        assert_eq!(c.len(), 4);
        assert_eq!(c.classify("active@example.com").await.unwrap(), StatusLabel::Flagged);
        assert_eq!(c.classify("flagged@example.com").await.unwrap(), StatusLabel::Active);
        assert_eq!(
            c.classify("Blocked@Example.com").await.unwrap(),
            StatusLabel::CaptchaBlocked
        );
        assert_eq!(c.classify("error@example.com").await.unwrap(), StatusLabel::Unknown);
        assert_eq!(c.classify("nomatch@example.com").await.unwrap(), StatusLabel::Active);
    }

    #[tokio::test]
    async fn dictionary_loads_from_json() {
        let path = std::env::temp_dir().join(format!("mailcheck-table-{}.json", std::process::id()));
        fs::write(&path, r#"{"Spam@Corp.io":"yes","bot@corp.io":"captcha"}"#).unwrap();

        let c = DictionaryClassifier::from_json_file(&path).unwrap();
        assert_eq!(c.classify("spam@corp.io").await.unwrap(), StatusLabel::Flagged);
        assert_eq!(c.classify("bot@corp.io").await.unwrap(), StatusLabel::CaptchaBlocked);
        assert_eq!(c.classify("other@corp.io").await.unwrap(), StatusLabel::Active);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn dictionary_missing_file_is_an_error() {
        let missing = Path::new("/nonexistent/mailcheck/table.json");
        assert!(DictionaryClassifier::from_json_file(missing).is_err());
    }
}
