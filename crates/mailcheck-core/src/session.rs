use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::UserId;

/// Per-user "awaiting emails" flags.
///
/// In memory only; lost on restart. The map never leaves this type.
#[derive(Debug, Default)]
pub struct SessionStore {
    flags: Mutex<HashMap<UserId, bool>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means the user never started a check (or cancelled it).
    pub async fn get(&self, user: UserId) -> Option<bool> {
        self.flags.lock().await.get(&user).copied()
    }

    pub async fn is_awaiting(&self, user: UserId) -> bool {
        self.get(user).await.unwrap_or(false)
    }

    pub async fn begin(&self, user: UserId) {
        self.flags.lock().await.insert(user, true);
    }

    /// A check attempt finished (either way); the next text is not a submission.
    pub async fn finish(&self, user: UserId) {
        self.flags.lock().await.insert(user, false);
    }

    pub async fn clear(&self, user: UserId) {
        self.flags.lock().await.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lifecycle() {
        let store = SessionStore::new();
        let u = UserId(7);

        assert_eq!(store.get(u).await, None);
        assert!(!store.is_awaiting(u).await);

        store.begin(u).await;
        store.begin(u).await;
        assert_eq!(store.get(u).await, Some(true));

        store.finish(u).await;
        assert_eq!(store.get(u).await, Some(false));
        assert!(!store.is_awaiting(u).await);

        store.clear(u).await;
        assert_eq!(store.get(u).await, None);
    }

    #[tokio::test]
    async fn clear_without_session_is_a_no_op() {
        let store = SessionStore::new();
        store.clear(UserId(1)).await;
        assert_eq!(store.get(UserId(1)).await, None);
    }

    #[tokio::test]
    async fn users_are_independent() {
        let store = SessionStore::new();
        store.begin(UserId(1)).await;
        assert!(store.is_awaiting(UserId(1)).await);
        assert!(!store.is_awaiting(UserId(2)).await);
    }
}
