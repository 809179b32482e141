//! HealthCheckHandler - Liveness and live-session count

use std::sync::Arc;

use crate::ports::{SessionStore, SessionStoreError};

/// Query for service health
#[derive(Debug, Clone, Default)]
pub struct HealthCheckQuery;

/// Service health snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub active_sessions: usize,
}

/// Handler for health checks
pub struct HealthCheckHandler {
    store: Arc<dyn SessionStore>,
}

impl HealthCheckHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: HealthCheckQuery) -> Result<HealthStatus, SessionStoreError> {
        let active_sessions = self.store.active_count().await?;
        Ok(HealthStatus { active_sessions })
    }
}
