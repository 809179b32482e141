//! Completion checking for registration records.

use super::record::RegistrationRecord;
use super::schema::{FieldSchema, RegistrationField};

/// Returns true when every schema field has been collected.
///
/// - absent or empty records are never complete
/// - a missing key fails the check, optional or not
/// - optional fields may hold an empty string
/// - all other fields must hold a non-blank value
pub fn is_complete(record: Option<&RegistrationRecord>) -> bool {
    let Some(record) = record else {
        return false;
    };
    if record.is_empty() {
        return false;
    }

    for field in FieldSchema::required_fields() {
        let Some(value) = record.get(*field) else {
            return false;
        };
        if field.is_optional() {
            continue;
        }
        if value.trim().is_empty() {
            return false;
        }
    }

    true
}

/// Non-optional fields that are absent or blank.
///
/// Diagnostic only; the controller logs this list when an extraction comes
/// back incomplete.
pub fn missing_required_fields(record: &RegistrationRecord) -> Vec<RegistrationField> {
    FieldSchema::required_fields()
        .iter()
        .copied()
        .filter(|field| !field.is_optional())
        .filter(|field| record.get(*field).map_or(true, |v| v.trim().is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn complete_record() -> RegistrationRecord {
        RegistrationRecord::new()
            .with(RegistrationField::FullName, "John Smith")
            .with(RegistrationField::Age, "34")
            .with(RegistrationField::Gender, "Male")
            .with(RegistrationField::ContactNumber, "555-1234")
            .with(RegistrationField::Email, "")
            .with(RegistrationField::Address, "123 Main St")
            .with(RegistrationField::ChiefComplaint, "headache")
            .with(RegistrationField::MedicalHistory, "")
            .with(RegistrationField::Allergies, "")
            .with(RegistrationField::CurrentMedications, "")
            .with(RegistrationField::EmergencyContactName, "Jane Doe")
            .with(RegistrationField::EmergencyContactRelationship, "sister")
            .with(RegistrationField::EmergencyContactPhone, "555-9999")
    }

    #[test]
    fn none_and_empty_records_are_incomplete() {
        assert!(!is_complete(None));
        assert!(!is_complete(Some(&RegistrationRecord::new())));
    }

    #[test]
    fn full_record_with_empty_optionals_is_complete() {
        assert!(is_complete(Some(&complete_record())));
    }

    #[test]
    fn missing_optional_key_is_incomplete() {
        let mut record = complete_record();
        record.clear(RegistrationField::Allergies);
        assert!(!is_complete(Some(&record)));
    }

    #[test]
    fn blank_required_value_is_incomplete() {
        let record = complete_record().with(RegistrationField::Address, "   ");
        assert!(!is_complete(Some(&record)));
    }

    #[test]
    fn missing_required_fields_lists_blank_and_absent() {
        let mut record = complete_record().with(RegistrationField::Gender, "");
        record.clear(RegistrationField::EmergencyContactPhone);
        record.clear(RegistrationField::Email);

        let missing = missing_required_fields(&record);
        assert_eq!(
            missing,
            vec![
                RegistrationField::Gender,
                RegistrationField::EmergencyContactPhone
            ]
        );
    }

    #[test]
    fn missing_required_fields_empty_for_complete_record() {
        assert!(missing_required_fields(&complete_record()).is_empty());
    }

    fn arb_required_field() -> impl Strategy<Value = RegistrationField> {
        proptest::sample::select(
            RegistrationField::ALL
                .iter()
                .copied()
                .filter(|f| !f.is_optional())
                .collect::<Vec<_>>(),
        )
    }

    fn arb_optional_values() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(prop_oneof![Just(String::new()), "[a-z]{1,12}"], 4)
    }

    proptest! {
        #[test]
        fn dropping_any_required_key_fails(field in arb_required_field()) {
            let mut record = complete_record();
            record.clear(field);
            prop_assert!(!is_complete(Some(&record)));
        }

        #[test]
        fn blank_required_value_fails(field in arb_required_field(), spaces in " {0,3}") {
            let record = complete_record().with(field, spaces);
            prop_assert!(!is_complete(Some(&record)));
        }

        #[test]
        fn optional_values_never_affect_completion(values in arb_optional_values()) {
            let mut record = complete_record();
            for (field, value) in RegistrationField::OPTIONAL.iter().zip(values) {
                record.set(*field, value);
            }
            prop_assert!(is_complete(Some(&record)));
        }

        #[test]
        fn non_empty_required_values_complete(values in prop::collection::vec("[A-Za-z0-9 ]{0,8}[A-Za-z0-9]", 9)) {
            let mut record = complete_record();
            let required = RegistrationField::ALL.iter().filter(|f| !f.is_optional());
            for (field, value) in required.zip(values) {
                record.set(*field, value);
            }
            prop_assert!(is_complete(Some(&record)));
        }
    }
}
