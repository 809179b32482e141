//! StartSessionHandler - Open a new intake dialogue

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::prompts::GREETING;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to start an intake session
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand;

/// Result of starting a session
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    /// First assistant turn, shown and spoken to the patient
    pub greeting: String,
}

/// Error type for starting sessions
#[derive(Debug, Clone)]
pub enum StartSessionError {
    Storage(String),
}

impl std::fmt::Display for StartSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartSessionError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for StartSessionError {}

impl From<SessionStoreError> for StartSessionError {
    fn from(err: SessionStoreError) -> Self {
        StartSessionError::Storage(err.to_string())
    }
}

/// Handler for starting sessions
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        _cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, StartSessionError> {
        let session = self.store.create(GREETING).await?;

        tracing::info!(session = %session.id.short(), "New intake session started");

        Ok(StartSessionResult {
            session_id: session.id,
            greeting: GREETING.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::TurnRole;

    #[tokio::test]
    async fn test_start_session_stores_greeting() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartSessionHandler::new(store.clone());

        let result = handler.handle(StartSessionCommand).await.unwrap();

        assert_eq!(result.greeting, GREETING);
        let session = store.get(result.session_id).await.unwrap();
        assert_eq!(session.turns_counted, 0);
        assert_eq!(session.conversation.len(), 1);
        assert_eq!(session.conversation[0].role, TurnRole::Assistant);
        assert_eq!(session.conversation[0].content, GREETING);
    }

    #[tokio::test]
    async fn test_each_start_gets_a_new_id() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartSessionHandler::new(store.clone());

        let a = handler.handle(StartSessionCommand).await.unwrap();
        let b = handler.handle(StartSessionCommand).await.unwrap();

        assert_ne!(a.session_id, b.session_id);
        assert_eq!(store.active_count().await.unwrap(), 2);
    }
}
