//! Pre-built, success-shaped records returned when no real analysis is
//! available. Each one passes through the completeness pass so it carries
//! every field a regular record does.

use crate::domain::{
    analysis::{
        entities::{AnalysisRecord, Condition, PartialAnalysis, QuickAnalysis, Urgency},
        parser::completeness::{ayurvedic_consultation, ensure_complete},
    },
    common::entities::app_errors::CoreError,
};

pub const QUOTA_EXCEEDED_CONDITION: &str = "API Quota Exceeded";
pub const API_ERROR_CONDITION: &str = "API Error";
pub const QUICK_API_ERROR_CONDITION: &str = "API Error - Unable to analyze symptoms";

const QUOTA_DESCRIPTION: &str =
    "The Google Gemini API quota has been exhausted. Please try again later or update your API key.";
const RETRY_RECOMMENDATION: &str =
    "Please try again later or consult a healthcare professional directly.";

/// Why a generation request produced no reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    QuotaExceeded,
    ApiError(String),
}

impl GenerationFailure {
    /// Quota exhaustion is recognised either from the error variant or from a
    /// message mentioning both `429` and `quota`.
    pub fn classify(error: &CoreError) -> Self {
        if let CoreError::QuotaExceeded(_) = error {
            return GenerationFailure::QuotaExceeded;
        }

        let message = error.to_string();
        if message.contains("429") && message.to_lowercase().contains("quota") {
            GenerationFailure::QuotaExceeded
        } else {
            GenerationFailure::ApiError(message)
        }
    }

    pub fn record(&self) -> AnalysisRecord {
        match self {
            GenerationFailure::QuotaExceeded => quota_exceeded_record(),
            GenerationFailure::ApiError(message) => api_error_record(message),
        }
    }

    pub fn quick(&self) -> QuickAnalysis {
        match self {
            GenerationFailure::QuotaExceeded => QuickAnalysis {
                possible_conditions: vec![QUOTA_EXCEEDED_CONDITION.to_string()],
                recommendation: QUOTA_DESCRIPTION.to_string(),
                urgency: Urgency::Medium,
            },
            GenerationFailure::ApiError(_) => QuickAnalysis {
                possible_conditions: vec![QUICK_API_ERROR_CONDITION.to_string()],
                recommendation: RETRY_RECOMMENDATION.to_string(),
                urgency: Urgency::Medium,
            },
        }
    }
}

pub fn empty_response_record() -> AnalysisRecord {
    let mut partial = PartialAnalysis {
        recommendation: "Please try again or consult a healthcare professional.".to_string(),
        urgency: Some(Urgency::Medium),
        follow_up_actions: strings(&["Please try again later"]),
        risk_factors: strings(&["Unable to analyze symptoms"]),
        ..Default::default()
    };
    partial.push_condition(Condition::error(
        "Analysis Failed",
        "The analysis could not be completed due to an error.",
    ));
    ensure_complete(partial)
}

pub fn parse_failed_record(error: &str) -> AnalysisRecord {
    let mut partial = PartialAnalysis {
        recommendation: "Please try again later or consult a healthcare professional.".to_string(),
        urgency: Some(Urgency::Medium),
        follow_up_actions: strings(&["Try again later", "Consult a healthcare professional"]),
        risk_factors: strings(&["Unable to analyze symptoms properly"]),
        dos: strings(&["Consult a healthcare professional"]),
        donts: strings(&["Don't rely solely on automated analysis"]),
        ..Default::default()
    };
    partial.push_condition(Condition::error(
        "Error Analyzing Symptoms",
        format!("There was an error analyzing your symptoms: {error}"),
    ));
    ensure_complete(partial)
}

pub fn quota_exceeded_record() -> AnalysisRecord {
    let mut partial = PartialAnalysis {
        recommendation: "The system is currently experiencing high demand. Please try again later or contact support for assistance.".to_string(),
        urgency: Some(Urgency::Medium),
        follow_up_actions: strings(&[
            "Try again later",
            "Contact support",
            "Consider updating the API key",
        ]),
        risk_factors: strings(&["Unable to analyze symptoms due to API limitations"]),
        preventive_measures: strings(&[
            "Consider using the offline symptom checker as an alternative",
        ]),
        dos: strings(&["Contact healthcare provider for urgent concerns"]),
        donts: strings(&["Don't rely solely on automated analysis"]),
        ..Default::default()
    };
    partial.ayurvedic_medication.recommendations = vec![ayurvedic_consultation()];
    partial.push_condition(Condition::error(QUOTA_EXCEEDED_CONDITION, QUOTA_DESCRIPTION));
    ensure_complete(partial)
}

pub fn api_error_record(error: &str) -> AnalysisRecord {
    let mut partial = PartialAnalysis {
        recommendation: RETRY_RECOMMENDATION.to_string(),
        urgency: Some(Urgency::Medium),
        follow_up_actions: strings(&["Try again later", "Consult a healthcare professional"]),
        risk_factors: strings(&["Unable to analyze symptoms properly"]),
        preventive_measures: strings(&["Consult a healthcare professional"]),
        dos: strings(&["Consult a healthcare professional"]),
        donts: strings(&["Don't rely solely on automated analysis"]),
        ..Default::default()
    };
    partial.push_condition(Condition::error(
        API_ERROR_CONDITION,
        format!("Unable to analyze symptoms: {error}"),
    ));
    ensure_complete(partial)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::entities::ERROR_CATEGORY;

    #[test]
    fn test_classify_quota_errors() {
        assert_eq!(
            GenerationFailure::classify(&CoreError::QuotaExceeded("429".to_string())),
            GenerationFailure::QuotaExceeded
        );
        assert_eq!(
            GenerationFailure::classify(&CoreError::ExternalServiceError(
                "status 429: Quota exceeded for metric".to_string()
            )),
            GenerationFailure::QuotaExceeded
        );
    }

    #[test]
    fn test_classify_other_errors() {
        let failure = GenerationFailure::classify(&CoreError::ExternalServiceError(
            "connection reset".to_string(),
        ));
        assert!(matches!(failure, GenerationFailure::ApiError(ref m) if m.contains("connection reset")));

        // 429 without a quota mention is an ordinary API error
        let failure =
            GenerationFailure::classify(&CoreError::ExternalServiceError("429".to_string()));
        assert!(matches!(failure, GenerationFailure::ApiError(_)));
    }

    #[test]
    fn test_fallback_records_are_complete_and_flagged() {
        let records = [
            empty_response_record(),
            parse_failed_record("boom"),
            quota_exceeded_record(),
            api_error_record("timeout"),
        ];

        for record in &records {
            assert_eq!(record.possible_conditions.len(), 1);
            assert_eq!(record.possible_conditions[0].category, ERROR_CATEGORY);
            assert_eq!(record.possible_conditions[0].probability, 100);
            assert_eq!(record.urgency, Urgency::Medium);
            assert!(!record.meal_recommendations.breakfast.is_empty());
            assert!(!record.ayurvedic_medication.recommendations.is_empty());
        }

        assert!(records[1].possible_conditions[0].description.ends_with(": boom"));
        assert!(records[3].possible_conditions[0].description.contains("timeout"));
    }

    #[test]
    fn test_quota_record_offers_ayurvedic_consultation() {
        let record = GenerationFailure::QuotaExceeded.record();

        assert_eq!(record.possible_conditions[0].name, QUOTA_EXCEEDED_CONDITION);
        assert_eq!(
            record.ayurvedic_medication.recommendations[0].name,
            "Ayurvedic Consultation"
        );
    }

    #[test]
    fn test_quick_fallbacks() {
        assert_eq!(
            GenerationFailure::QuotaExceeded.quick().possible_conditions,
            vec![QUOTA_EXCEEDED_CONDITION]
        );
        assert_eq!(
            GenerationFailure::ApiError("x".to_string()).quick().possible_conditions,
            vec![QUICK_API_ERROR_CONDITION]
        );
    }
}
