//! Route configuration for intake endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, process_speech, reset_session, start_session, IntakeAppState};

/// Creates the intake router.
///
/// Routes:
/// - `POST /api/start-session` - Open a session, returns the greeting
/// - `POST /api/process-speech` - Submit one utterance
/// - `POST /api/reset-session` - Discard a session
/// - `GET /api/health` - Liveness and live-session count
pub fn intake_router() -> Router<IntakeAppState> {
    Router::new()
        .route("/api/start-session", post(start_session))
        .route("/api/process-speech", post(process_speech))
        .route("/api/reset-session", post(reset_session))
        .route("/api/health", get(health))
}
