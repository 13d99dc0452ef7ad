use std::sync::Arc;

use mailcheck_core::classify::Classifier;

/// Shared service state, cloned into every handler.
#[derive(Clone)]
pub struct ServiceState {
    /// Shared secret expected in `x-api-key`.
    pub api_key: Arc<str>,
    /// Classification strategy.
    pub classifier: Arc<dyn Classifier>,
}

impl ServiceState {
    pub fn new(api_key: &str, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            api_key: Arc::from(api_key),
            classifier,
        }
    }
}
