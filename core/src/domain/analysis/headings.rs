//! Section headings and sub-labels shared by prompt rendering and parsing.
//!
//! The generator is told to use exactly these spellings and the parser looks
//! for exactly these spellings, so both sides read them from here.

pub const POSSIBLE_CONDITIONS: &str = "POSSIBLE CONDITIONS";
pub const RECOMMENDATION: &str = "RECOMMENDATION";
pub const URGENCY_LEVEL: &str = "URGENCY LEVEL";
pub const FOLLOW_UP_ACTIONS: &str = "FOLLOW-UP ACTIONS";
pub const RISK_FACTORS: &str = "RISK FACTORS";
pub const MEAL_RECOMMENDATIONS: &str = "INDIAN MEAL RECOMMENDATIONS";
pub const EXERCISE_PLAN: &str = "EXERCISE PLAN";
pub const POSSIBLE_DISEASES: &str = "POSSIBLE DISEASES";
pub const PREVENTIVE_MEASURES: &str = "PREVENTIVE MEASURES";
pub const MEDICINE_RECOMMENDATIONS: &str = "MEDICINE RECOMMENDATIONS";
pub const AYURVEDIC_MEDICATION: &str = "AYURVEDIC MEDICATION";
pub const DOS: &str = "DO'S";
pub const DONTS: &str = "DON'TS";
pub const REPORTS_REQUIRED: &str = "REPORTS REQUIRED";
pub const HEALTH_SCORE: &str = "HEALTH SCORE";

/// Every top-level section, in the order the generator is asked to write them.
pub const SECTION_HEADINGS: [&str; 15] = [
    POSSIBLE_CONDITIONS,
    RECOMMENDATION,
    URGENCY_LEVEL,
    FOLLOW_UP_ACTIONS,
    RISK_FACTORS,
    MEAL_RECOMMENDATIONS,
    EXERCISE_PLAN,
    POSSIBLE_DISEASES,
    PREVENTIVE_MEASURES,
    MEDICINE_RECOMMENDATIONS,
    AYURVEDIC_MEDICATION,
    DOS,
    DONTS,
    REPORTS_REQUIRED,
    HEALTH_SCORE,
];

/// Suffixes of the per-condition sub-headings, e.g. `MIGRAINE RECOMMENDED ACTIONS:`.
pub const CONDITION_ACTIONS_SUFFIX: &str = "RECOMMENDED ACTIONS";
pub const CONDITION_PREVENTION_SUFFIX: &str = "PREVENTIVE MEASURES";

pub const BREAKFAST: &str = "Breakfast";
pub const LUNCH: &str = "Lunch";
pub const DINNER: &str = "Dinner";
pub const MEAL_LABELS: [&str; 3] = [BREAKFAST, LUNCH, DINNER];

pub const DESCRIPTION: &str = "Description";
pub const IMPORTANCE: &str = "Importance";
pub const BENEFITS: &str = "Benefits";
pub const AYURVEDIC_LABELS: [&str; 3] = [DESCRIPTION, IMPORTANCE, BENEFITS];

pub const PURPOSE: &str = "Purpose";
pub const ANALYSIS_DETAILS: &str = "Analysis Details";
pub const PREPARATION_REQUIRED: &str = "Preparation Required";
pub const RECOMMENDATION_REASON: &str = "Recommendation Reason";
pub const REPORT_LABELS: [&str; 5] = [
    PURPOSE,
    BENEFITS,
    ANALYSIS_DETAILS,
    PREPARATION_REQUIRED,
    RECOMMENDATION_REASON,
];

/// Opening words of the sentence closing the meal section.
pub const MEAL_NOTE_OPENING: &str = "These meal recommendations are based on your";
