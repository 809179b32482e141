//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling the hosted model.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("How old are you?")
//!     .with_error(MockError::Unavailable { message: "down".into() });
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(response.content, "How old are you?");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    RequestPurpose, TokenUsage,
};

/// Content returned once the configured queue is exhausted.
pub const DEFAULT_MOCK_RESPONSE: &str = "Mock response";

/// Mock AI provider for testing.
///
/// Configurable to return specific responses or inject errors.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success {
        content: String,
        usage: TokenUsage,
        finish_reason: FinishReason,
    },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_response_full(content, TokenUsage::new(10, 20), FinishReason::Stop)
    }

    /// Adds a successful response with full configuration.
    pub fn with_response_full(
        self,
        content: impl Into<String>,
        usage: TokenUsage,
        finish_reason: FinishReason,
    ) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            usage,
            finish_reason,
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Queues a response on a shared handle (after construction).
    pub fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .push_back(response);
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Returns the number of calls made for a given purpose.
    pub fn call_count_for(&self, purpose: RequestPurpose) -> usize {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .iter()
            .filter(|r| r.purpose() == purpose)
            .count()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().expect("mock call log poisoned").clear();
    }

    /// Gets the next response or a default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_MOCK_RESPONSE.to_string(),
                usage: TokenUsage::new(5, 10),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request);

        match self.next_response() {
            MockResponse::Success {
                content,
                usage,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
