use async_trait::async_trait;

use crate::{wire::CheckResults, Result};

/// What the front end needs from the classification service.
#[async_trait]
pub trait CheckService: Send + Sync {
    /// Liveness probe. `Ok` only on a success status.
    async fn status(&self) -> Result<()>;

    /// Classify a batch; every submitted email comes back as a key.
    async fn check(&self, emails: &[String]) -> Result<CheckResults>;
}
