use tracing::debug;

use super::{
    completeness::INCONCLUSIVE_CONDITION,
    lists::ListStrategy,
    normalize::{normalize_field, normalize_items},
    sections::{self, SectionMap},
};
use crate::domain::analysis::{
    entities::{QuickAnalysis, Urgency},
    headings,
};

pub const DEFAULT_QUICK_RECOMMENDATION: &str =
    "Please consult a healthcare professional for a proper diagnosis.";

/// Parses the short reply format: plain condition names, a recommendation
/// paragraph and an urgency word. Missing parts fall back to defaults.
pub fn parse_quick_response(raw: &str) -> QuickAnalysis {
    let sections = SectionMap::split(raw);

    let body = sections::possible_conditions_body(raw).unwrap_or_default();
    let mut possible_conditions = normalize_items(ListStrategy::Numbered.extract(body));
    if possible_conditions.is_empty() {
        possible_conditions = normalize_items(body.lines());
    }
    if possible_conditions.is_empty() {
        possible_conditions.push(INCONCLUSIVE_CONDITION.to_string());
    }

    let recommendation = sections
        .get(headings::RECOMMENDATION)
        .map(normalize_field)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DEFAULT_QUICK_RECOMMENDATION.to_string());

    let urgency = sections
        .get(headings::URGENCY_LEVEL)
        .map(Urgency::classify)
        .unwrap_or_default();

    debug!(
        conditions = possible_conditions.len(),
        %urgency,
        "parsed quick analysis"
    );

    QuickAnalysis {
        possible_conditions,
        recommendation,
        urgency,
    }
}
