use serde::{Deserialize, Serialize};

use crate::domain::analysis::entities::AnalysisRecord;

pub const DEFAULT_EXERCISE_FREQUENCY: &str = "moderate";
pub const DEFAULT_SLEEP_QUALITY: &str = "fair";
pub const DEFAULT_STRESS_LEVEL: &str = "moderate";
pub const DEFAULT_DIET_PREFERENCE: &str = "balanced";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub name: String,
    /// 1 (barely noticeable) to 10 (unbearable).
    pub severity: u8,
    pub duration: String,
}

impl Symptom {
    pub fn new(name: impl Into<String>, severity: u8, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity,
            duration: duration.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientProfile {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub medical_history: Vec<String>,
    /// Free-text history in the patient's own words.
    pub medical_history_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifestyleFactors {
    pub exercise_frequency: String,
    pub sleep_quality: String,
    pub stress_level: String,
}

impl Default for LifestyleFactors {
    fn default() -> Self {
        Self {
            exercise_frequency: DEFAULT_EXERCISE_FREQUENCY.to_string(),
            sleep_quality: DEFAULT_SLEEP_QUALITY.to_string(),
            stress_level: DEFAULT_STRESS_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeSymptomsInput {
    /// Identity of the caller, used for audit logging only.
    pub requester: Option<String>,
    pub patient: PatientProfile,
    pub symptoms: Vec<Symptom>,
    pub lifestyle: LifestyleFactors,
    pub diet_preference: String,
    pub current_medications: String,
    pub allergies: String,
    pub recent_life_changes: String,
}

impl Default for AnalyzeSymptomsInput {
    fn default() -> Self {
        Self {
            requester: None,
            patient: PatientProfile::default(),
            symptoms: Vec::new(),
            lifestyle: LifestyleFactors::default(),
            diet_preference: DEFAULT_DIET_PREFERENCE.to_string(),
            current_medications: String::new(),
            allergies: String::new(),
            recent_life_changes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickAnalyzeInput {
    pub requester: Option<String>,
    /// Free-text description of what the patient feels.
    pub symptoms: String,
    pub age: Option<u32>,
}

/// A new document or set of notes to analyse in light of an earlier result.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUpAnalysisInput {
    pub requester: Option<String>,
    pub previous_analysis: AnalysisRecord,
    pub reported_symptoms: Vec<Symptom>,
    pub document_text: String,
    pub diet_preference: String,
}

/// Decoding parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    pub fn full_analysis() -> Self {
        Self {
            temperature: 0.4,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 4096,
        }
    }

    pub fn quick_analysis() -> Self {
        Self {
            max_output_tokens: 1024,
            ..Self::full_analysis()
        }
    }
}
