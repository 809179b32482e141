//! ResetSessionHandler - Discard an intake session

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to reset a session. A missing id is accepted and does nothing.
#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: Option<SessionId>,
}

/// Result of a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSessionResult {
    /// Whether a live session was actually removed
    pub removed: bool,
}

/// Error type for resetting sessions
#[derive(Debug, Clone)]
pub enum ResetSessionError {
    Storage(String),
}

impl std::fmt::Display for ResetSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetSessionError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for ResetSessionError {}

impl From<SessionStoreError> for ResetSessionError {
    fn from(err: SessionStoreError) -> Self {
        ResetSessionError::Storage(err.to_string())
    }
}

/// Handler for resetting sessions
pub struct ResetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ResetSessionCommand,
    ) -> Result<ResetSessionResult, ResetSessionError> {
        let Some(session_id) = cmd.session_id else {
            return Ok(ResetSessionResult { removed: false });
        };

        let removed = self.store.delete(session_id).await?;
        if removed {
            tracing::info!(session = %session_id.short(), "Session reset");
        }

        Ok(ResetSessionResult { removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn test_reset_removes_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = store.create("Hi").await.unwrap();
        let handler = ResetSessionHandler::new(store.clone());

        let result = handler
            .handle(ResetSessionCommand {
                session_id: Some(session.id),
            })
            .await
            .unwrap();

        assert!(result.removed);
        assert!(!store.contains(session.id).await);
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = store.create("Hi").await.unwrap();
        let handler = ResetSessionHandler::new(store.clone());
        let cmd = ResetSessionCommand {
            session_id: Some(session.id),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert!(!second.removed);
    }

    #[tokio::test]
    async fn test_reset_without_id_is_noop() {
        let store = Arc::new(InMemorySessionStore::new());
        store.create("Hi").await.unwrap();
        let handler = ResetSessionHandler::new(store.clone());

        let result = handler
            .handle(ResetSessionCommand { session_id: None })
            .await
            .unwrap();

        assert!(!result.removed);
        assert_eq!(store.active_count().await.unwrap(), 1);
    }
}
