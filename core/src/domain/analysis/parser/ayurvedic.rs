use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::blocks::{
    block_title, capture_labeled_fields, enumerate_field_value, label_pattern,
    split_numbered_blocks,
};
use super::normalize::normalize_field;
use crate::domain::analysis::{entities::AyurvedicRecommendation, headings};

static AYURVEDIC_FIELDS: LazyLock<Regex> =
    LazyLock::new(|| label_pattern(&headings::AYURVEDIC_LABELS).unwrap());

/// Reads the numbered remedies of the AYURVEDIC MEDICATION section. A remedy
/// is kept only when it has a name and at least one labelled field.
pub fn extract_ayurvedic_recommendations(body: &str) -> Vec<AyurvedicRecommendation> {
    split_numbered_blocks(body)
        .into_iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let fields = capture_labeled_fields(block, &AYURVEDIC_FIELDS);
            let field = |label: &str| {
                fields
                    .get(label)
                    .map(enumerate_field_value)
                    .filter(|value| !normalize_field(value).is_empty())
                    .unwrap_or_default()
            };

            let recommendation = AyurvedicRecommendation {
                name: block_title(block, &AYURVEDIC_FIELDS),
                description: field(headings::DESCRIPTION),
                importance: field(headings::IMPORTANCE),
                benefits: field(headings::BENEFITS),
            };

            if normalize_field(&recommendation.name).is_empty() || !recommendation.has_details() {
                debug!(block = index + 1, "skipping ayurvedic block without details");
                return None;
            }
            Some(recommendation)
        })
        .collect()
}
