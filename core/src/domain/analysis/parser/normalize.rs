use crate::domain::analysis::entities::{
    AyurvedicRecommendation, DiagnosticReport, MealPlan, PartialAnalysis,
};

/// Strips emphasis asterisks, collapses every whitespace run (newlines
/// included) to a single space and trims.
///
/// Normalizing an already normalized string returns it unchanged.
pub fn normalize_field(text: &str) -> String {
    text.replace('*', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes every item and drops the ones left empty.
pub fn normalize_items<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| normalize_field(item.as_ref()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Final normalization pass over everything extraction produced.
pub fn normalize_analysis(analysis: &mut PartialAnalysis) {
    for entry in &mut analysis.conditions {
        entry.condition.name = normalize_field(&entry.condition.name);
        entry.condition.description = normalize_field(&entry.condition.description);
        normalize_list(&mut entry.detail.recommended_actions);
        normalize_list(&mut entry.detail.preventive_measures);
    }

    analysis.recommendation = normalize_field(&analysis.recommendation);

    for list in [
        &mut analysis.follow_up_actions,
        &mut analysis.risk_factors,
        &mut analysis.exercise_plan,
        &mut analysis.diseases,
        &mut analysis.preventive_measures,
        &mut analysis.medicine_recommendations,
        &mut analysis.dos,
        &mut analysis.donts,
    ] {
        normalize_list(list);
    }

    normalize_meal_plan(&mut analysis.meal_recommendations);

    for recommendation in &mut analysis.ayurvedic_medication.recommendations {
        normalize_ayurvedic(recommendation);
    }

    for report in &mut analysis.reports_required {
        normalize_report(report);
    }
}

fn normalize_list(list: &mut Vec<String>) {
    *list = normalize_items(list.drain(..));
}

fn normalize_meal_plan(plan: &mut MealPlan) {
    normalize_list(&mut plan.breakfast);
    normalize_list(&mut plan.lunch);
    normalize_list(&mut plan.dinner);
    plan.note = normalize_field(&plan.note);
}

fn normalize_ayurvedic(recommendation: &mut AyurvedicRecommendation) {
    recommendation.name = normalize_field(&recommendation.name);
    recommendation.description = normalize_field(&recommendation.description);
    recommendation.importance = normalize_field(&recommendation.importance);
    recommendation.benefits = normalize_field(&recommendation.benefits);
}

fn normalize_report(report: &mut DiagnosticReport) {
    report.name = normalize_field(&report.name);
    for field in [
        &mut report.purpose,
        &mut report.benefits,
        &mut report.analysis_details,
        &mut report.preparation_required,
        &mut report.recommendation_reason,
    ] {
        *field = field
            .as_deref()
            .map(normalize_field)
            .filter(|value| !value.is_empty());
    }
}
