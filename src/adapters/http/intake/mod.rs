//! HTTP adapter for intake endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, MessageResponse, ProcessSpeechRequest, ProcessSpeechResponse,
    ResetSessionRequest, StartSessionResponse,
};
pub use handlers::IntakeAppState;
pub use routes::intake_router;
