//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intake;

pub use intake::{
    // Session lifecycle
    StartSessionCommand, StartSessionError, StartSessionHandler, StartSessionResult,
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, ResetSessionResult,
    HealthCheckHandler, HealthCheckQuery, HealthStatus,
    // Dialogue
    ProcessSpeechCommand, ProcessSpeechError, ProcessSpeechHandler, ProcessSpeechResult,
    ExtractionFailure, ExtractionOutcome,
};
