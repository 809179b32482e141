//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! - **InMemorySessionStore** - process-local map; sessions do not survive restart

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
