//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Hosted model provider and a scriptable mock
//! - `storage` - Session store implementations
//! - `http` - REST endpoints (axum)

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{GroqConfig, GroqProvider, MockAIProvider};
pub use http::{intake_router, IntakeAppState};
pub use storage::InMemorySessionStore;
