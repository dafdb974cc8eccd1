//! Process-wide session slot for the Spotify access token
//!
//! One slot for the whole process: the most recent successful code exchange
//! wins, and a later login overwrites the previous token. Writes are
//! whole-value replacements, so concurrent logins race benignly
//! (last-writer-wins). The token survives until process exit; there is no
//! expiry tracking or refresh.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Cloneable handle to the single access-token slot
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Create an empty session (no token held)
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bearer token, if a login has completed
    pub async fn bearer(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Replace the held token with a freshly exchanged one
    pub async fn store(&self, token: String) {
        *self.token.write().await = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_session_holds_no_token() {
        let session = Session::new();
        assert!(session.bearer().await.is_none());
    }

    #[tokio::test]
    async fn store_makes_token_visible_to_all_clones() {
        let session = Session::new();
        let clone = session.clone();

        session.store("token_abc".to_string()).await;

        assert_eq!(clone.bearer().await.as_deref(), Some("token_abc"));
    }

    #[tokio::test]
    async fn later_store_overwrites_earlier_token() {
        let session = Session::new();

        session.store("first".to_string()).await;
        session.store("second".to_string()).await;

        assert_eq!(session.bearer().await.as_deref(), Some("second"));
    }
}
