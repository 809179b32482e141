//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - hosted language model (conversation and extraction)
//! - `SessionStore` - in-progress intake sessions

mod ai_provider;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, RequestPurpose, TokenUsage,
};
pub use session_store::{SessionStore, SessionStoreError};
