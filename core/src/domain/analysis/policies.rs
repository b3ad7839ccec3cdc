use crate::domain::{analysis::value_objects::Symptom, common::entities::app_errors::CoreError};

/// Rejects symptom lists the generator cannot work with: an empty list, or a
/// symptom missing its name or duration or with a severity outside 1 to 10.
pub fn ensure_valid_symptoms(symptoms: &[Symptom]) -> Result<(), CoreError> {
    if symptoms.is_empty() {
        return Err(CoreError::Invalid(
            "At least one symptom is required".to_string(),
        ));
    }

    for (index, symptom) in symptoms.iter().enumerate() {
        let position = index + 1;

        if symptom.name.trim().is_empty() {
            return Err(CoreError::Invalid(format!(
                "Symptom {position} is missing a name"
            )));
        }

        if !(1..=10).contains(&symptom.severity) {
            return Err(CoreError::Invalid(format!(
                "Invalid severity for symptom '{}': must be between 1 and 10",
                symptom.name
            )));
        }

        if symptom.duration.trim().is_empty() {
            return Err(CoreError::Invalid(format!(
                "Symptom '{}' is missing a duration",
                symptom.name
            )));
        }
    }

    Ok(())
}
