//! Registration record - the structured outcome of an intake dialogue.
//!
//! Every field is an `Option<String>`:
//! - `None` means the extractor did not produce the key at all
//! - `Some("")` means the field was discussed and recorded as empty
//!
//! The distinction matters to the completion check. Optional fields may be
//! empty, but they must still be present.

use serde::{Deserialize, Deserializer, Serialize};

use super::schema::RegistrationField;

/// Structured registration form data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub chief_complaint: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub medical_history: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub allergies: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub current_medications: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub emergency_contact_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub emergency_contact_relationship: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub emergency_contact_phone: Option<String>,
}

impl RegistrationRecord {
    /// Creates a record with no fields present.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: RegistrationField) -> &Option<String> {
        match field {
            RegistrationField::FullName => &self.full_name,
            RegistrationField::Age => &self.age,
            RegistrationField::Gender => &self.gender,
            RegistrationField::ContactNumber => &self.contact_number,
            RegistrationField::Email => &self.email,
            RegistrationField::Address => &self.address,
            RegistrationField::ChiefComplaint => &self.chief_complaint,
            RegistrationField::MedicalHistory => &self.medical_history,
            RegistrationField::Allergies => &self.allergies,
            RegistrationField::CurrentMedications => &self.current_medications,
            RegistrationField::EmergencyContactName => &self.emergency_contact_name,
            RegistrationField::EmergencyContactRelationship => {
                &self.emergency_contact_relationship
            }
            RegistrationField::EmergencyContactPhone => &self.emergency_contact_phone,
        }
    }

    fn slot_mut(&mut self, field: RegistrationField) -> &mut Option<String> {
        match field {
            RegistrationField::FullName => &mut self.full_name,
            RegistrationField::Age => &mut self.age,
            RegistrationField::Gender => &mut self.gender,
            RegistrationField::ContactNumber => &mut self.contact_number,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Address => &mut self.address,
            RegistrationField::ChiefComplaint => &mut self.chief_complaint,
            RegistrationField::MedicalHistory => &mut self.medical_history,
            RegistrationField::Allergies => &mut self.allergies,
            RegistrationField::CurrentMedications => &mut self.current_medications,
            RegistrationField::EmergencyContactName => &mut self.emergency_contact_name,
            RegistrationField::EmergencyContactRelationship => {
                &mut self.emergency_contact_relationship
            }
            RegistrationField::EmergencyContactPhone => &mut self.emergency_contact_phone,
        }
    }

    /// Value of a field, `None` when the key is absent.
    pub fn get(&self, field: RegistrationField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Sets a field value.
    pub fn set(&mut self, field: RegistrationField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: RegistrationField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Removes a field, making its key absent.
    pub fn clear(&mut self, field: RegistrationField) {
        *self.slot_mut(field) = None;
    }

    /// Whether the key for `field` is present (possibly empty).
    pub fn contains(&self, field: RegistrationField) -> bool {
        self.slot(field).is_some()
    }

    /// True when no field is present at all.
    pub fn is_empty(&self) -> bool {
        RegistrationField::ALL.iter().all(|f| !self.contains(*f))
    }

    /// Number of keys present.
    pub fn present_count(&self) -> usize {
        RegistrationField::ALL
            .iter()
            .filter(|f| self.contains(**f))
            .count()
    }

    /// Defaults every absent field to an empty string.
    pub fn with_all_fields(mut self) -> Self {
        for field in RegistrationField::ALL {
            let slot = self.slot_mut(field);
            if slot.is_none() {
                *slot = Some(String::new());
            }
        }
        self
    }

    /// Trims values and canonicalises gender and age.
    pub fn normalized(mut self) -> Self {
        for field in RegistrationField::ALL {
            if let Some(value) = self.slot_mut(field) {
                let trimmed = value.trim();
                if trimmed.len() != value.len() {
                    *value = trimmed.to_string();
                }
            }
        }
        if let Some(gender) = self.gender.as_mut() {
            if let Some(canonical) = canonical_gender(gender) {
                *gender = canonical.to_string();
            }
        }
        if let Some(age) = self.age.as_mut() {
            if let Some(digits) = leading_digits(age) {
                *age = digits;
            }
        }
        self
    }
}

/// Maps common spellings onto "Male", "Female" or "Other".
pub fn canonical_gender(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "m" | "male" | "man" | "boy" => Some("Male"),
        "f" | "female" | "woman" | "girl" => Some("Female"),
        "other" | "o" | "non-binary" | "nonbinary" | "non binary" => Some("Other"),
        _ => None,
    }
}

/// First run of ASCII digits in `raw`, if any.
fn leading_digits(raw: &str) -> Option<String> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let digits: String = raw[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some(digits)
}

/// Accepts strings, numbers, booleans, arrays and objects; `null` counts as absent.
///
/// Falsy values (`false`, `0`, `{}`, `[]`) become the empty string so the
/// completion check treats them as not collected.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(render_value))
}

fn render_value(value: serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) if is_zero(&n) => Some(String::new()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(render_value)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(map) if map.is_empty() => Some(String::new()),
        other @ Value::Object(_) => Some(other.to_string()),
    }
}

fn is_zero(n: &serde_json::Number) -> bool {
    n.as_f64() == Some(0.0)
}
