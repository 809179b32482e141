//! Session Store Port - Interface for holding in-progress intake sessions.
//!
//! Sessions live only for the duration of a registration dialogue. The
//! store owns them exclusively: callers get clones and write changes back
//! with [`SessionStore::update`].

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::intake::Session;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),
}

/// Port for session lifecycle management
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session under a fresh id, seeded with the greeting turn
    async fn create(&self, greeting: &str) -> Result<Session, SessionStoreError>;

    /// Load a session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` for unknown ids
    async fn get(&self, id: SessionId) -> Result<Session, SessionStoreError>;

    /// Replace the stored state of an existing session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if the session was deleted
    async fn update(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Delete a session. Unknown ids are a no-op.
    ///
    /// # Returns
    /// `true` if a session was removed
    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError>;

    /// Number of live sessions
    async fn active_count(&self) -> Result<usize, SessionStoreError>;

    /// Drop every session, returning how many were dropped
    async fn clear(&self) -> Result<usize, SessionStoreError>;
}
