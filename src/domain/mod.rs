//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs)
//! - `intake` - Registration schema, records, sessions, prompts and extraction parsing

pub mod foundation;
pub mod intake;
