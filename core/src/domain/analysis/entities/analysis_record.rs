use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub const GENERAL_CATEGORY: &str = "general";
pub const ERROR_CATEGORY: &str = "error";

/// The complete, schema-valid result of one analysis.
///
/// Every field is always populated; see
/// [`ensure_complete`](crate::domain::analysis::parser::completeness::ensure_complete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub possible_conditions: Vec<Condition>,
    pub recommendation: String,
    pub urgency: Urgency,
    pub follow_up_actions: Vec<String>,
    pub risk_factors: Vec<String>,
    pub meal_recommendations: MealPlan,
    pub exercise_plan: Vec<String>,
    pub diseases: Vec<String>,
    pub preventive_measures: Vec<String>,
    pub medicine_recommendations: Vec<String>,
    pub ayurvedic_medication: AyurvedicAdvice,
    pub dos: Vec<String>,
    pub donts: Vec<String>,
    pub condition_specific_data: BTreeMap<String, ConditionDetail>,
    pub reports_required: Vec<DiagnosticReport>,
    pub health_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    /// Reads a free-text urgency answer. Any mention of "high" wins, then
    /// "medium" or "moderate"; anything else is low.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();

        if text.contains("high") {
            Urgency::High
        } else if text.contains("medium") || text.contains("moderate") {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    /// Percentage in `0..=100`.
    pub probability: u8,
    pub description: String,
    pub category: String,
}

impl Condition {
    pub fn new(name: impl Into<String>, probability: u8, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probability: probability.min(100),
            description: description.into(),
            category: GENERAL_CATEGORY.to_string(),
        }
    }

    /// A placeholder condition reporting why no real analysis is available.
    pub fn error(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probability: 100,
            description: description.into(),
            category: ERROR_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDetail {
    pub recommended_actions: Vec<String>,
    pub preventive_measures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyurvedicAdvice {
    pub recommendations: Vec<AyurvedicRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyurvedicRecommendation {
    pub name: String,
    pub description: String,
    pub importance: String,
    pub benefits: String,
}

impl AyurvedicRecommendation {
    pub fn has_details(&self) -> bool {
        !self.description.is_empty() || !self.importance.is_empty() || !self.benefits.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_reason: Option<String>,
}

impl DiagnosticReport {
    /// Number of the five optional fields carrying content.
    pub fn filled_fields(&self) -> usize {
        [
            &self.purpose,
            &self.benefits,
            &self.analysis_details,
            &self.preparation_required,
            &self.recommendation_reason,
        ]
        .into_iter()
        .filter(|field| field.as_deref().is_some_and(|value| !value.is_empty()))
        .count()
    }
}
