use healthvitals_core::domain::analysis::{
    AnalysisRecord, AnalyzeSymptomsInput, FollowUpAnalysisInput, LifestyleFactors,
    PatientProfile, QuickAnalyzeInput, Symptom,
    value_objects::DEFAULT_DIET_PREFERENCE,
};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Severity used when a request carries a severity string that is not a number.
const FALLBACK_SEVERITY: u8 = 5;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SymptomRequest {
    #[validate(length(min = 1, message = "symptom name is required"))]
    pub name: String,

    #[serde(deserialize_with = "deserialize_severity")]
    #[validate(range(min = 1, max = 10, message = "severity must be between 1 and 10"))]
    pub severity: u8,

    #[validate(length(min = 1, message = "symptom duration is required"))]
    pub duration: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSymptomsRequest {
    #[validate(
        length(min = 1, message = "at least one symptom is required"),
        nested
    )]
    pub symptoms: Vec<SymptomRequest>,

    #[validate(range(max = 150, message = "age must be at most 150"))]
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub medical_history_text: String,

    pub exercise_frequency: Option<String>,
    pub sleep_quality: Option<String>,
    pub stress_level: Option<String>,

    pub diet_preference: Option<String>,
    #[serde(default)]
    pub current_medications: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub recent_life_changes: String,
}

#[derive(Debug, Validate)]
pub struct QuickAnalyzeRequest {
    #[validate(length(min = 1, message = "Please provide symptoms"))]
    pub symptoms: String,

    #[validate(range(max = 150, message = "age must be at most 150"))]
    pub age: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    #[serde(default)]
    #[validate(nested)]
    pub symptoms: Vec<SymptomRequest>,
    pub diet_preference: Option<String>,
}

impl From<SymptomRequest> for Symptom {
    fn from(request: SymptomRequest) -> Self {
        Symptom::new(request.name.trim(), request.severity, request.duration.trim())
    }
}

impl From<AnalyzeSymptomsRequest> for AnalyzeSymptomsInput {
    fn from(request: AnalyzeSymptomsRequest) -> Self {
        let defaults = LifestyleFactors::default();

        Self {
            requester: None,
            patient: PatientProfile {
                age: request.age,
                gender: non_empty(request.gender),
                height_cm: request.height,
                weight_kg: request.weight,
                medical_history: request.medical_history,
                medical_history_text: request.medical_history_text,
            },
            symptoms: request.symptoms.into_iter().map(Symptom::from).collect(),
            lifestyle: LifestyleFactors {
                exercise_frequency: non_empty(request.exercise_frequency)
                    .unwrap_or(defaults.exercise_frequency),
                sleep_quality: non_empty(request.sleep_quality).unwrap_or(defaults.sleep_quality),
                stress_level: non_empty(request.stress_level).unwrap_or(defaults.stress_level),
            },
            diet_preference: diet_or_default(request.diet_preference),
            current_medications: request.current_medications,
            allergies: request.allergies,
            recent_life_changes: request.recent_life_changes,
        }
    }
}

impl From<QuickAnalyzeRequest> for QuickAnalyzeInput {
    fn from(request: QuickAnalyzeRequest) -> Self {
        Self {
            requester: None,
            symptoms: request.symptoms,
            age: request.age,
        }
    }
}

impl FollowUpRequest {
    pub fn into_input(self, previous_analysis: AnalysisRecord, document_text: String) -> FollowUpAnalysisInput {
        FollowUpAnalysisInput {
            requester: None,
            previous_analysis,
            reported_symptoms: self.symptoms.into_iter().map(Symptom::from).collect(),
            document_text,
            diet_preference: diet_or_default(self.diet_preference),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn diet_or_default(value: Option<String>) -> String {
    non_empty(value).unwrap_or_else(|| DEFAULT_DIET_PREFERENCE.to_string())
}

/// Accepts a severity written as a number or as a numeric string. A string
/// that does not parse becomes the middle severity; out-of-range numbers are
/// left for validation to reject.
fn deserialize_severity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSeverity {
        Number(f64),
        Text(String),
    }

    let value = match RawSeverity::deserialize(deserializer)? {
        RawSeverity::Number(number) => number,
        RawSeverity::Text(text) => match text.trim().parse::<f64>() {
            Ok(number) => number,
            Err(_) => return Ok(FALLBACK_SEVERITY),
        },
    };

    let rounded = value.round();
    if (0.0..=f64::from(u8::MAX)).contains(&rounded) {
        Ok(rounded as u8)
    } else {
        Ok(0)
    }
}
