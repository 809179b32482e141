//! HTTP handlers for intake endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::intake::{
    HealthCheckHandler, HealthCheckQuery, ProcessSpeechCommand, ProcessSpeechError,
    ProcessSpeechHandler, ProcessSpeechResult, ResetSessionCommand, ResetSessionHandler,
    StartSessionCommand, StartSessionHandler,
};
use crate::config::IntakeConfig;
use crate::domain::foundation::SessionId;
use crate::domain::intake::prompts::APOLOGY_MESSAGE;
use crate::ports::{AIProvider, SessionStore};

use super::dto::{
    ErrorResponse, HealthResponse, MessageResponse, ProcessSpeechRequest, ProcessSpeechResponse,
    ResetSessionRequest, StartSessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Application state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the intake endpoints.
#[derive(Clone)]
pub struct IntakeAppState {
    pub store: Arc<dyn SessionStore>,
    pub ai_provider: Arc<dyn AIProvider>,
    pub config: IntakeConfig,
}

impl IntakeAppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        ai_provider: Arc<dyn AIProvider>,
        config: IntakeConfig,
    ) -> Self {
        Self {
            store,
            ai_provider,
            config,
        }
    }

    pub fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.store.clone())
    }

    pub fn process_speech_handler(&self) -> ProcessSpeechHandler<dyn AIProvider> {
        ProcessSpeechHandler::new(
            self.store.clone(),
            self.ai_provider.clone(),
            self.config.clone(),
        )
    }

    pub fn reset_session_handler(&self) -> ResetSessionHandler {
        ResetSessionHandler::new(self.store.clone())
    }

    pub fn health_check_handler(&self) -> HealthCheckHandler {
        HealthCheckHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/start-session - Open a session and return the greeting
pub async fn start_session(State(state): State<IntakeAppState>) -> Response {
    match state.start_session_handler().handle(StartSessionCommand).await {
        Ok(result) => {
            let response = StartSessionResponse {
                session_id: result.session_id.to_string(),
                message: result.greeting,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to start session");
            internal_error(e.to_string())
        }
    }
}

/// POST /api/process-speech - Advance the dialogue by one utterance
pub async fn process_speech(
    State(state): State<IntakeAppState>,
    Json(req): Json<ProcessSpeechRequest>,
) -> Response {
    let cmd = ProcessSpeechCommand {
        session_id: parse_session_id(req.session_id.as_deref()),
        user_input: req.user_input,
    };

    match state.process_speech_handler().handle(cmd).await {
        Ok(ProcessSpeechResult::Continuing {
            session_id,
            message,
            ..
        }) => {
            let response = ProcessSpeechResponse::continuing(message, session_id.to_string());
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(ProcessSpeechResult::Completed {
            message, record, ..
        }) => {
            let response = ProcessSpeechResponse::completed(message, record);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_process_speech_error(e),
    }
}

/// POST /api/reset-session - Discard a session; always succeeds
pub async fn reset_session(
    State(state): State<IntakeAppState>,
    req: Option<Json<ResetSessionRequest>>,
) -> Response {
    let req = req.map(|Json(r)| r).unwrap_or_default();
    let cmd = ResetSessionCommand {
        session_id: parse_session_id(req.session_id.as_deref()),
    };

    match state.reset_session_handler().handle(cmd).await {
        Ok(_) => {
            let response = MessageResponse {
                message: "Session reset successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reset session");
            internal_error(e.to_string())
        }
    }
}

/// GET /api/health - Liveness plus live-session count
pub async fn health(State(state): State<IntakeAppState>) -> Response {
    match state.health_check_handler().handle(HealthCheckQuery).await {
        Ok(status) => {
            let response = HealthResponse {
                status: "healthy".to_string(),
                message: "Intake server is running".to_string(),
                active_sessions: status.active_sessions,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            internal_error(e.to_string())
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: Option<&str>) -> Option<SessionId> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

fn handle_process_speech_error(error: ProcessSpeechError) -> Response {
    match error {
        ProcessSpeechError::InvalidSession => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::invalid_session()),
        )
            .into_response(),
        ProcessSpeechError::Gateway(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::gateway(APOLOGY_MESSAGE)),
        )
            .into_response(),
        ProcessSpeechError::Storage(e) => {
            tracing::error!(error = %e, "Session storage failed");
            internal_error(e)
        }
    }
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(message)),
    )
        .into_response()
}
