//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GroqProvider` - Groq hosted models over the OpenAI-compatible API
//! - `MockAIProvider` - Configurable mock for testing

mod groq_provider;
mod mock_provider;

pub use groq_provider::{GroqConfig, GroqProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_MOCK_RESPONSE};
