//! HTTP DTOs for intake endpoints.
//!
//! Field names are the wire contract of the browser client and stay snake_case.

use serde::{Deserialize, Serialize};

use crate::domain::intake::RegistrationRecord;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request carrying one patient utterance.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessSpeechRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_input: String,
}

/// Request to discard a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetSessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a newly started session.
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub message: String,
}

/// Response for a processed utterance.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProcessSpeechResponse {
    Continuing {
        message: String,
        completed: bool,
        session_id: String,
    },
    Completed {
        message: String,
        completed: bool,
        form_data: RegistrationRecord,
    },
}

impl ProcessSpeechResponse {
    pub fn continuing(message: String, session_id: String) -> Self {
        Self::Continuing {
            message,
            completed: false,
            session_id,
        }
    }

    pub fn completed(message: String, form_data: RegistrationRecord) -> Self {
        Self::Completed {
            message,
            completed: true,
            form_data,
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub active_sessions: usize,
}

/// Error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Unknown or missing session; the client should start over.
    pub fn invalid_session() -> Self {
        Self {
            error: "Invalid session".to_string(),
            restart: Some(true),
            message: None,
        }
    }

    /// Model call failed; `message` is read out to the patient.
    pub fn gateway(apology: impl Into<String>) -> Self {
        Self {
            error: "Failed to process request".to_string(),
            restart: None,
            message: Some(apology.into()),
        }
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            restart: None,
            message: None,
        }
    }
}
