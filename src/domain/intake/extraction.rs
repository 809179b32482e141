//! Parsing of model extraction output into a registration record.
//!
//! The model is asked for bare JSON but regularly wraps it in Markdown
//! fences or adds a sentence before or after. The parser tolerates both.

use thiserror::Error;

use super::record::RegistrationRecord;

/// Errors that can occur while parsing extraction output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No JSON object found in model output")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    InvalidJson(String),
}

/// Strips code fences and slices the outermost `{ ... }` span.
pub fn locate_json_object(raw: &str) -> Result<&str, ExtractionError> {
    let trimmed = raw.trim();

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return Ok(&trimmed[start..=end]);
        }
    }

    if trimmed.is_empty() {
        return Err(ExtractionError::NoJsonObject);
    }
    Ok(trimmed)
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses model output into a record carrying all thirteen keys.
///
/// Missing keys default to the empty string, values are trimmed and gender
/// and age are canonicalised.
pub fn parse_extraction(raw: &str) -> Result<RegistrationRecord, ExtractionError> {
    let cleaned = strip_fences(raw);
    let json = locate_json_object(&cleaned)?;

    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(ExtractionError::InvalidJson(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    let record: RegistrationRecord =
        serde_json::from_value(value).map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;

    Ok(record.normalized().with_all_fields())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
