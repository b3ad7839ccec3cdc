//! Recovers an [`AnalysisRecord`] from a free-text generator reply.
//!
//! Stages run in a fixed order: split sections, extract conditions (tiered),
//! read the plain list sections, read meals, remedies, reports and the health
//! score, normalize every leaf string, then fill defaults. A failure anywhere
//! yields the fixed error record instead of an error.

pub mod ayurvedic;
pub mod blocks;
pub mod completeness;
pub mod conditions;
pub mod lists;
pub mod meals;
pub mod normalize;
pub mod quick;
pub mod reports;
pub mod sections;

use std::{
    backtrace::Backtrace,
    panic::{self, AssertUnwindSafe},
    sync::LazyLock,
};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::analysis::{
    entities::{AnalysisRecord, PartialAnalysis, Urgency},
    fallbacks, headings,
};

use self::{
    ayurvedic::extract_ayurvedic_recommendations, completeness::ensure_complete,
    conditions::extract_conditions, lists::extract_list_items, meals::extract_meal_plan,
    normalize::{normalize_analysis, normalize_field}, reports::extract_reports,
    sections::SectionMap,
};

/// A whole number out of ten. Decimal scores such as `7.5/10` are not read.
static HEALTH_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.])(\d+)\s*(?:/|out\s+of)\s*10\b").unwrap()
});

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("parser panicked: {0}")]
    Panicked(String),
}

/// Parses a full-analysis reply. Never fails: empty input gives the
/// "Analysis Failed" record and any internal failure gives the
/// "Error Analyzing Symptoms" record.
pub fn parse_analysis_response(raw: &str) -> AnalysisRecord {
    if raw.trim().is_empty() {
        info!("empty reply, returning the empty-response record");
        return fallbacks::empty_response_record();
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| extract_analysis(raw)))
        .unwrap_or_else(|payload| Err(ParseError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(record) => {
            info!(
                conditions = record.possible_conditions.len(),
                urgency = %record.urgency,
                reports = record.reports_required.len(),
                health_score = record.health_score,
                "parsed analysis reply"
            );
            record
        }
        Err(err) => {
            error!(
                error = %err,
                backtrace = %Backtrace::force_capture(),
                "failed to parse analysis reply"
            );
            fallbacks::parse_failed_record(&err.to_string())
        }
    }
}

/// Runs every extraction stage. Returns an error only for failures the
/// extraction itself cannot recover from.
pub fn extract_analysis(raw: &str) -> Result<AnalysisRecord, ParseError> {
    let sections = SectionMap::split(raw);
    let mut partial = PartialAnalysis::default();

    extract_conditions(raw, &sections, &mut partial)?;
    extract_section_fields(&sections, &mut partial);
    extract_special_sections(&sections, &mut partial);

    normalize_analysis(&mut partial);
    Ok(ensure_complete(partial))
}

fn extract_section_fields(sections: &SectionMap, partial: &mut PartialAnalysis) {
    partial.recommendation = sections
        .get(headings::RECOMMENDATION)
        .map(normalize_field)
        .unwrap_or_default();
    partial.urgency = sections.get(headings::URGENCY_LEVEL).map(Urgency::classify);

    let list = |label: &str| sections.get(label).map(extract_list_items).unwrap_or_default();
    partial.follow_up_actions = list(headings::FOLLOW_UP_ACTIONS);
    partial.risk_factors = list(headings::RISK_FACTORS);
    partial.exercise_plan = list(headings::EXERCISE_PLAN);
    partial.diseases = list(headings::POSSIBLE_DISEASES);
    partial.preventive_measures = list(headings::PREVENTIVE_MEASURES);
    partial.medicine_recommendations = list(headings::MEDICINE_RECOMMENDATIONS);
    partial.dos = list(headings::DOS);
    partial.donts = list(headings::DONTS);

    debug!(
        has_recommendation = !partial.recommendation.is_empty(),
        urgency = ?partial.urgency,
        follow_up_actions = partial.follow_up_actions.len(),
        dos = partial.dos.len(),
        donts = partial.donts.len(),
        "extracted section fields"
    );
}

fn extract_special_sections(sections: &SectionMap, partial: &mut PartialAnalysis) {
    partial.meal_recommendations = extract_meal_plan(sections);

    if let Some(body) = sections.get(headings::AYURVEDIC_MEDICATION) {
        partial.ayurvedic_medication.recommendations = extract_ayurvedic_recommendations(body);
    }

    if let Some(body) = sections.get(headings::REPORTS_REQUIRED) {
        partial.reports_required = extract_reports(body);
    }

    partial.health_score = sections
        .get(headings::HEALTH_SCORE)
        .and_then(extract_health_score);

    debug!(
        ayurvedic = partial.ayurvedic_medication.recommendations.len(),
        reports = partial.reports_required.len(),
        health_score = ?partial.health_score,
        "extracted special sections"
    );
}

/// `7/10` or `7 out of 10`; anything outside 1 to 10 is treated as absent.
fn extract_health_score(body: &str) -> Option<u8> {
    let caps = HEALTH_SCORE.captures(body)?;
    caps[1]
        .parse::<u8>()
        .ok()
        .filter(|score| (1..=10).contains(score))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::entities::ERROR_CATEGORY;

    const FULL_REPLY: &str = "POSSIBLE CONDITIONS:
1. Tension Headache (Probability: 65%): Muscle tension around the head and neck
TENSION HEADACHE RECOMMENDED ACTIONS:
1. Apply a warm compress
2. Take regular screen breaks
TENSION HEADACHE PREVENTIVE MEASURES:
- Maintain good posture
2. Migraine (Probability: 20%): Recurrent throbbing headaches
3. Sinusitis (Probability: 8%): Inflamed sinuses
4. Dehydration (Probability: 5%): Low fluid intake
5. Hypertension (Probability: 2%): Raised blood pressure

RECOMMENDATION:
Rest in a quiet room and *stay* hydrated.

URGENCY LEVEL:
Medium

FOLLOW-UP ACTIONS:
1. Track headache frequency
2. Visit a doctor if pain persists beyond a week

RISK FACTORS:
- Prolonged screen time
- Poor sleep

INDIAN MEAL RECOMMENDATIONS:
Breakfast:
1. Oats upma with vegetables
Lunch:
1. Brown rice with dal
Dinner:
1. Vegetable khichdi
These meal recommendations are based on your vegetarian diet preference.

EXERCISE PLAN:
1. 20 minutes of brisk walking

POSSIBLE DISEASES:
1. Chronic tension-type headache

PREVENTIVE MEASURES:
1. Sleep 7 to 8 hours

MEDICINE RECOMMENDATIONS:
1. Paracetamol 500 mg if needed

AYURVEDIC MEDICATION:
1. Brahmi
- Description: A memory supporting herb
- Importance: Calms the nervous system
- Benefits: Reduces stress

DO'S:
1. Take breaks from screens

DON'TS:
1. Don't skip meals

REPORTS REQUIRED:
1. Complete Blood Count
- Purpose: Rule out anaemia
- Benefits: Simple and quick
- Analysis Details: Measures haemoglobin
2. Eye Examination
- Purpose: Rule out eye strain
- Benefits: Non invasive

HEALTH SCORE:
7/10 - Generally healthy with stress related symptoms
";

    #[test]
    fn test_empty_input_gives_analysis_failed() {
        for raw in ["", "   \n\t"] {
            let record = parse_analysis_response(raw);
            assert_eq!(record.possible_conditions.len(), 1);
            assert_eq!(record.possible_conditions[0].name, "Analysis Failed");
            assert_eq!(record.urgency, Urgency::Medium);
        }
    }

    #[test]
    fn test_minimal_valid_input() {
        let raw = "POSSIBLE CONDITIONS:\n1. Flu (Probability: 80%): viral infection\n\
                   RECOMMENDATION:\nRest.\nURGENCY LEVEL:\nlow";
        let record = parse_analysis_response(raw);

        assert_eq!(record.possible_conditions.len(), 1);
        assert_eq!(record.possible_conditions[0].name, "Flu");
        assert_eq!(record.possible_conditions[0].probability, 80);
        assert_eq!(record.possible_conditions[0].description, "viral infection");
        assert_eq!(record.recommendation, "Rest.");
        assert_eq!(record.urgency, Urgency::Low);
    }

    #[test]
    fn test_five_conditions_in_source_order() {
        let record = parse_analysis_response(FULL_REPLY);
        let conditions: Vec<_> = record
            .possible_conditions
            .iter()
            .map(|c| (c.name.as_str(), c.probability))
            .collect();

        assert_eq!(
            conditions,
            vec![
                ("Tension Headache", 65),
                ("Migraine", 20),
                ("Sinusitis", 8),
                ("Dehydration", 5),
                ("Hypertension", 2),
            ]
        );
    }

    #[test]
    fn test_full_reply_fields() {
        let record = parse_analysis_response(FULL_REPLY);

        assert_eq!(record.recommendation, "Rest in a quiet room and stay hydrated.");
        assert_eq!(record.urgency, Urgency::Medium);
        assert_eq!(record.follow_up_actions.len(), 2);
        assert_eq!(record.risk_factors, vec!["Prolonged screen time", "Poor sleep"]);
        assert_eq!(record.meal_recommendations.breakfast, vec!["Oats upma with vegetables"]);
        assert_eq!(record.meal_recommendations.dinner, vec!["Vegetable khichdi"]);
        assert!(record.meal_recommendations.note.contains("vegetarian diet preference"));
        assert_eq!(record.exercise_plan, vec!["20 minutes of brisk walking"]);
        assert_eq!(record.medicine_recommendations, vec!["Paracetamol 500 mg if needed"]);
        assert_eq!(record.ayurvedic_medication.recommendations[0].name, "Brahmi");
        assert_eq!(record.dos, vec!["Take breaks from screens"]);
        assert_eq!(record.donts, vec!["Don't skip meals"]);
        assert_eq!(record.health_score, 7);

        let headache = &record.condition_specific_data["Tension Headache"];
        assert_eq!(
            headache.recommended_actions,
            vec!["Apply a warm compress", "Take regular screen breaks"]
        );
        assert_eq!(headache.preventive_measures, vec!["Maintain good posture"]);
        assert_eq!(record.condition_specific_data.len(), 5);
    }

    #[test]
    fn test_report_with_two_fields_is_excluded() {
        let record = parse_analysis_response(FULL_REPLY);

        assert_eq!(record.reports_required.len(), 1);
        assert_eq!(record.reports_required[0].name, "Complete Blood Count");
    }

    #[test]
    fn test_lab_values_inside_report_fields_keep_reports() {
        let raw = "POSSIBLE CONDITIONS:
1. Hyperlipidemia (Probability: 55%): raised cholesterol
RECOMMENDATION:
Review diet.
REPORTS REQUIRED:
1. Lipid Profile
- Purpose: Measure blood fats
- Analysis Details:
LDL: should be under 100
HDL: above 40 is protective
- Benefits: Guides treatment
2. Thyroid Panel
- Purpose: Check thyroid function
- Benefits: Explains weight changes
- Analysis Details: TSH and free T4
HEALTH SCORE:
6/10
";
        let record = parse_analysis_response(raw);
        let names: Vec<_> = record.reports_required.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Lipid Profile", "Thyroid Panel"]);
        let details = record.reports_required[0].analysis_details.as_deref().unwrap();
        assert!(details.contains("LDL: should be under 100"), "{details}");
        assert!(details.contains("HDL: above 40 is protective"), "{details}");
        assert_eq!(record.health_score, 6);
    }

    #[test]
    fn test_asterisks_are_stripped_everywhere() {
        let raw = "POSSIBLE CONDITIONS:\n1. **Flu** (Probability: 80%): *viral* infection\n\
                   RECOMMENDATION:\n**Rest** well.\nDO'S:\n- *Sleep* early\nURGENCY LEVEL:\n**high**";
        let record = parse_analysis_response(raw);
        let json = serde_json::to_string(&record).unwrap();

        assert!(!json.contains('*'), "{json}");
        assert_eq!(record.possible_conditions[0].name, "Flu");
        assert_eq!(record.recommendation, "Rest well.");
        assert_eq!(record.dos, vec!["Sleep early"]);
        assert_eq!(record.urgency, Urgency::High);
    }

    #[test]
    fn test_missing_urgency_defaults_to_medium() {
        let raw = "POSSIBLE CONDITIONS:\n1. Flu (Probability: 80%): viral\nRECOMMENDATION:\nRest.";
        assert_eq!(parse_analysis_response(raw).urgency, Urgency::Medium);
    }

    #[test]
    fn test_unstructured_reply_is_still_complete() {
        let record = parse_analysis_response("I cannot provide medical advice.");

        assert_eq!(record.possible_conditions.len(), 1);
        assert_ne!(record.possible_conditions[0].category, ERROR_CATEGORY);
        assert!(!record.follow_up_actions.is_empty());
        assert!(!record.meal_recommendations.note.is_empty());
        assert_eq!(record.health_score, 5);
    }

    #[test]
    fn test_health_score_formats() {
        assert_eq!(extract_health_score("8/10 - good"), Some(8));
        assert_eq!(extract_health_score("Score: 6 out of 10"), Some(6));
        assert_eq!(extract_health_score("0/10"), None);
        assert_eq!(extract_health_score("15/10"), None);
        assert_eq!(extract_health_score("7.5/10"), None);
        assert_eq!(extract_health_score("Overall 9 / 10"), Some(9));
        assert_eq!(extract_health_score("about average"), None);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }
}
