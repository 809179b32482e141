//! Intake handlers.
//!
//! Session lifecycle and the per-utterance dialogue controller.

mod health;
mod process_speech;
mod reset_session;
mod start_session;

pub use health::{HealthCheckHandler, HealthCheckQuery, HealthStatus};
pub use process_speech::{
    ExtractionFailure, ExtractionOutcome, ProcessSpeechCommand, ProcessSpeechError,
    ProcessSpeechHandler, ProcessSpeechResult,
};
pub use reset_session::{
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, ResetSessionResult,
};
pub use start_session::{
    StartSessionCommand, StartSessionError, StartSessionHandler, StartSessionResult,
};
