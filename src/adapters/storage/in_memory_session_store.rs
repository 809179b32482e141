//! In-Memory Session Store Adapter
//!
//! Holds intake sessions in a process-local map. Sessions are lost on
//! restart. No per-session locking is performed: concurrent requests for
//! the same session id race, last write wins.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::intake::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for intake sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a fully-formed session (useful for tests)
    pub async fn insert(&self, session: Session) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(SessionStoreError::AlreadyExists(session.id));
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    /// Whether a session is currently stored
    pub async fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().await.contains_key(&id)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, greeting: &str) -> Result<Session, SessionStoreError> {
        let mut sessions = self.sessions.write().await;

        // The loop only guards against live ids. Ids of deleted sessions are
        // not remembered; that they never come back rests on UUID v4 randomness.
        let mut id = SessionId::new();
        while sessions.contains_key(&id) {
            id = SessionId::new();
        }

        let session = Session::start(id, greeting);
        sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn get(&self, id: SessionId) -> Result<Session, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn update(&self, session: &Session) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.id) {
            Some(slot) => {
                *slot = session.clone();
                Ok(())
            }
            None => Err(SessionStoreError::NotFound(session.id)),
        }
    }

    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }

    async fn active_count(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions.read().await.len())
    }

    async fn clear(&self) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let dropped = sessions.len();
        sessions.clear();
        Ok(dropped)
    }
}
