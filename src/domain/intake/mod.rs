//! Patient intake domain.
//!
//! Pure logic for the registration dialogue: the field schema, the
//! registration record and its completion check, the session transcript,
//! prompt rendering and parsing of extraction output. Nothing here performs
//! I/O; the application layer wires it to the model and the session store.

pub mod completion;
pub mod conversation;
pub mod extraction;
pub mod prompts;
pub mod record;
pub mod schema;

pub use completion::{is_complete, missing_required_fields};
pub use conversation::{Session, Turn, TurnRole};
pub use extraction::{parse_extraction, ExtractionError};
pub use record::RegistrationRecord;
pub use schema::{FieldSchema, RegistrationField};
