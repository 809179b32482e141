//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ExtractionFailure, ExtractionOutcome, HealthCheckHandler, HealthCheckQuery, HealthStatus,
    ProcessSpeechCommand, ProcessSpeechError, ProcessSpeechHandler, ProcessSpeechResult,
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, ResetSessionResult,
    StartSessionCommand, StartSessionError, StartSessionHandler, StartSessionResult,
};
