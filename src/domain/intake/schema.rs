//! Registration field schema.
//!
//! The thirteen fields collected from every patient, in the order the
//! receptionist asks for them. Four of them are optional: the patient may
//! decline them, in which case the field is recorded as an empty string.
//! Optional never means "may be missing from the record".

use std::fmt;

/// One field of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistrationField {
    FullName,
    Age,
    Gender,
    ContactNumber,
    Email,
    Address,
    ChiefComplaint,
    MedicalHistory,
    Allergies,
    CurrentMedications,
    EmergencyContactName,
    EmergencyContactRelationship,
    EmergencyContactPhone,
}

impl RegistrationField {
    /// All fields, in collection order.
    pub const ALL: [RegistrationField; 13] = [
        RegistrationField::FullName,
        RegistrationField::Age,
        RegistrationField::Gender,
        RegistrationField::ContactNumber,
        RegistrationField::Email,
        RegistrationField::Address,
        RegistrationField::ChiefComplaint,
        RegistrationField::MedicalHistory,
        RegistrationField::Allergies,
        RegistrationField::CurrentMedications,
        RegistrationField::EmergencyContactName,
        RegistrationField::EmergencyContactRelationship,
        RegistrationField::EmergencyContactPhone,
    ];

    /// Fields that may be recorded as empty.
    pub const OPTIONAL: [RegistrationField; 4] = [
        RegistrationField::Email,
        RegistrationField::MedicalHistory,
        RegistrationField::Allergies,
        RegistrationField::CurrentMedications,
    ];

    /// JSON key used on the wire and in extraction output.
    pub fn key(&self) -> &'static str {
        match self {
            RegistrationField::FullName => "fullName",
            RegistrationField::Age => "age",
            RegistrationField::Gender => "gender",
            RegistrationField::ContactNumber => "contactNumber",
            RegistrationField::Email => "email",
            RegistrationField::Address => "address",
            RegistrationField::ChiefComplaint => "chiefComplaint",
            RegistrationField::MedicalHistory => "medicalHistory",
            RegistrationField::Allergies => "allergies",
            RegistrationField::CurrentMedications => "currentMedications",
            RegistrationField::EmergencyContactName => "emergencyContactName",
            RegistrationField::EmergencyContactRelationship => "emergencyContactRelationship",
            RegistrationField::EmergencyContactPhone => "emergencyContactPhone",
        }
    }

    /// Human description used when rendering prompts.
    pub fn description(&self) -> &'static str {
        match self {
            RegistrationField::FullName => "Full name",
            RegistrationField::Age => "Age",
            RegistrationField::Gender => "Gender - Male/Female/Other",
            RegistrationField::ContactNumber => "Phone number",
            RegistrationField::Email => "Email address",
            RegistrationField::Address => "Complete residential address",
            RegistrationField::ChiefComplaint => "Chief complaint - reason for visit",
            RegistrationField::MedicalHistory => "Past medical history",
            RegistrationField::Allergies => "Allergies",
            RegistrationField::CurrentMedications => "Current medications",
            RegistrationField::EmergencyContactName => "Emergency contact person's name",
            RegistrationField::EmergencyContactRelationship => "Emergency contact relationship",
            RegistrationField::EmergencyContactPhone => "Emergency contact phone number",
        }
    }

    /// Placeholder shown to the model in the extraction template.
    pub fn extraction_hint(&self) -> &'static str {
        match self {
            RegistrationField::FullName => "Patient's full name",
            RegistrationField::Age => "Age as number only (e.g., 21)",
            RegistrationField::Gender => "Male, Female, or Other",
            RegistrationField::ContactNumber => "Phone number",
            RegistrationField::Email => "Email address or empty string if skipped",
            RegistrationField::Address => "Complete residential address",
            RegistrationField::ChiefComplaint => "Reason for visit",
            RegistrationField::MedicalHistory => "Past medical conditions or empty string if none",
            RegistrationField::Allergies => "Allergies or empty string if none",
            RegistrationField::CurrentMedications => "Current medications or empty string if none",
            RegistrationField::EmergencyContactName => "Emergency contact person's name",
            RegistrationField::EmergencyContactRelationship => "Relationship to patient",
            RegistrationField::EmergencyContactPhone => "Emergency contact phone number",
        }
    }

    /// Whether an empty value still counts as collected.
    pub fn is_optional(&self) -> bool {
        Self::OPTIONAL.contains(self)
    }

    /// Looks a field up by its wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Process-wide field schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSchema;

impl FieldSchema {
    /// Every field the record must carry, in collection order.
    pub fn required_fields() -> &'static [RegistrationField] {
        &RegistrationField::ALL
    }

    /// The subset that may be empty and still satisfy completion.
    pub fn optional_fields() -> &'static [RegistrationField] {
        &RegistrationField::OPTIONAL
    }

    pub fn field_count() -> usize {
        RegistrationField::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_thirteen_fields() {
        assert_eq!(FieldSchema::field_count(), 13);
        assert_eq!(FieldSchema::required_fields().len(), 13);
    }

    #[test]
    fn optional_fields_are_subset_of_required() {
        for field in FieldSchema::optional_fields() {
            assert!(FieldSchema::required_fields().contains(field));
        }
    }

    #[test]
    fn optional_flags_match_schema() {
        assert!(RegistrationField::Email.is_optional());
        assert!(RegistrationField::MedicalHistory.is_optional());
        assert!(RegistrationField::Allergies.is_optional());
        assert!(RegistrationField::CurrentMedications.is_optional());
        assert!(!RegistrationField::FullName.is_optional());
        assert!(!RegistrationField::EmergencyContactPhone.is_optional());
    }

    #[test]
    fn keys_are_unique_and_resolvable() {
        for field in RegistrationField::ALL {
            assert_eq!(RegistrationField::from_key(field.key()), Some(field));
        }
        assert_eq!(RegistrationField::from_key("insuranceNumber"), None);
    }

    #[test]
    fn first_field_is_full_name() {
        assert_eq!(FieldSchema::required_fields()[0], RegistrationField::FullName);
        assert_eq!(RegistrationField::FullName.to_string(), "fullName");
    }
}
