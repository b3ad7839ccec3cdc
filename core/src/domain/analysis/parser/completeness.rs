use std::collections::{BTreeMap, btree_map::Entry};

use tracing::warn;

use crate::domain::analysis::entities::{
    AnalysisRecord, AyurvedicAdvice, AyurvedicRecommendation, Condition, ConditionDetail,
    MealPlan, PartialAnalysis,
};

pub const DEFAULT_RECOMMENDATION: &str =
    "Please consult a healthcare professional for a thorough diagnosis.";
pub const DEFAULT_HEALTH_SCORE: u8 = 5;
pub const INCONCLUSIVE_CONDITION: &str = "Symptom analysis inconclusive";

const DEFAULT_FOLLOW_UP_ACTIONS: [&str; 3] = [
    "Consult with a healthcare provider",
    "Monitor your symptoms",
    "Stay hydrated",
];
const DEFAULT_RISK_FACTORS: [&str; 1] = ["Consult a healthcare professional for a full assessment"];
const DEFAULT_EXERCISE_PLAN: [&str; 1] = ["Consult your doctor before starting any exercise regimen"];
const DEFAULT_DISEASES: [&str; 1] = ["Analysis could not identify specific diseases"];
const DEFAULT_PREVENTIVE_MEASURES: [&str; 3] = [
    "Stay hydrated",
    "Get adequate rest",
    "Maintain a balanced diet",
];
const DEFAULT_MEDICINE_RECOMMENDATIONS: [&str; 1] =
    ["Consult a healthcare professional before taking any medication"];
const DEFAULT_DOS: [&str; 3] = [
    "Seek professional medical advice",
    "Take notes of your symptoms",
    "Stay hydrated",
];
const DEFAULT_DONTS: [&str; 3] = [
    "Don't self-diagnose",
    "Don't ignore persistent symptoms",
    "Don't delay seeking medical help if symptoms worsen",
];
const DEFAULT_MEAL: &str = "Consult a nutritionist for personalized meal plans";
const DEFAULT_MEAL_NOTE: &str = "Consult a healthcare professional for dietary advice.";
const DEFAULT_CONDITION_ACTIONS: [&str; 1] =
    ["Discuss this condition with a healthcare professional"];
const DEFAULT_CONDITION_PREVENTION: [&str; 1] =
    ["Follow the general preventive measures in this report"];

/// The remedy offered when the reply named none.
pub fn ayurvedic_consultation() -> AyurvedicRecommendation {
    AyurvedicRecommendation {
        name: "Ayurvedic Consultation".to_string(),
        description: "Consult a qualified Ayurvedic practitioner for personalized recommendations."
            .to_string(),
        importance: "Ayurvedic treatment depends on an individual assessment of your constitution."
            .to_string(),
        benefits: "A practitioner can suggest remedies suited to your symptoms and history."
            .to_string(),
    }
}

/// Turns whatever extraction recovered into a complete record. Present values
/// are kept as they are; empty ones are replaced by fixed defaults.
pub fn ensure_complete(partial: PartialAnalysis) -> AnalysisRecord {
    let PartialAnalysis {
        mut conditions,
        recommendation,
        urgency,
        follow_up_actions,
        risk_factors,
        meal_recommendations,
        exercise_plan,
        diseases,
        preventive_measures,
        medicine_recommendations,
        ayurvedic_medication,
        dos,
        donts,
        reports_required,
        health_score,
    } = partial;

    if conditions.is_empty() {
        let mut fallback = PartialAnalysis::default();
        fallback.push_condition(Condition::new(
            INCONCLUSIVE_CONDITION,
            0,
            "The reply did not name any specific condition.",
        ));
        conditions = fallback.conditions;
    }

    let mut condition_specific_data = BTreeMap::new();
    let mut possible_conditions = Vec::with_capacity(conditions.len());
    for entry in conditions {
        match condition_specific_data.entry(entry.condition.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(complete_detail(entry.detail));
            }
            Entry::Occupied(_) => {
                warn!(
                    condition = %entry.condition.name,
                    id = entry.id.0,
                    "duplicate condition name, keeping the first detail entry"
                );
            }
        }
        possible_conditions.push(entry.condition);
    }

    AnalysisRecord {
        possible_conditions,
        recommendation: or_default_text(recommendation, DEFAULT_RECOMMENDATION),
        urgency: urgency.unwrap_or_default(),
        follow_up_actions: or_default_list(follow_up_actions, &DEFAULT_FOLLOW_UP_ACTIONS),
        risk_factors: or_default_list(risk_factors, &DEFAULT_RISK_FACTORS),
        meal_recommendations: complete_meal_plan(meal_recommendations),
        exercise_plan: or_default_list(exercise_plan, &DEFAULT_EXERCISE_PLAN),
        diseases: or_default_list(diseases, &DEFAULT_DISEASES),
        preventive_measures: or_default_list(preventive_measures, &DEFAULT_PREVENTIVE_MEASURES),
        medicine_recommendations: or_default_list(
            medicine_recommendations,
            &DEFAULT_MEDICINE_RECOMMENDATIONS,
        ),
        ayurvedic_medication: complete_ayurvedic(ayurvedic_medication),
        dos: or_default_list(dos, &DEFAULT_DOS),
        donts: or_default_list(donts, &DEFAULT_DONTS),
        condition_specific_data,
        reports_required,
        health_score: health_score
            .filter(|score| (1..=10).contains(score))
            .unwrap_or(DEFAULT_HEALTH_SCORE),
    }
}

fn or_default_text(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn or_default_list(values: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|value| value.to_string()).collect()
    } else {
        values
    }
}

fn complete_meal_plan(plan: MealPlan) -> MealPlan {
    MealPlan {
        breakfast: or_default_list(plan.breakfast, &[DEFAULT_MEAL]),
        lunch: or_default_list(plan.lunch, &[DEFAULT_MEAL]),
        dinner: or_default_list(plan.dinner, &[DEFAULT_MEAL]),
        note: or_default_text(plan.note, DEFAULT_MEAL_NOTE),
    }
}

fn complete_ayurvedic(advice: AyurvedicAdvice) -> AyurvedicAdvice {
    if advice.recommendations.is_empty() {
        AyurvedicAdvice {
            recommendations: vec![ayurvedic_consultation()],
        }
    } else {
        advice
    }
}

fn complete_detail(detail: ConditionDetail) -> ConditionDetail {
    ConditionDetail {
        recommended_actions: or_default_list(detail.recommended_actions, &DEFAULT_CONDITION_ACTIONS),
        preventive_measures: or_default_list(
            detail.preventive_measures,
            &DEFAULT_CONDITION_PREVENTION,
        ),
    }
}
