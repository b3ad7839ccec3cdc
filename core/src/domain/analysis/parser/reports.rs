use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::blocks::{
    LabeledFields, block_title, capture_labeled_fields, enumerate_field_value, label_pattern,
    split_numbered_blocks,
};
use super::normalize::normalize_field;
use crate::domain::analysis::{entities::DiagnosticReport, headings};

/// Fewest labelled fields a numbered block needs to count as a report. Lower
/// counts are usually ordinary numbered lines.
pub const MIN_REPORT_FIELDS: usize = 3;

static REPORT_FIELDS: LazyLock<Regex> =
    LazyLock::new(|| label_pattern(&headings::REPORT_LABELS).unwrap());

pub fn extract_reports(body: &str) -> Vec<DiagnosticReport> {
    split_numbered_blocks(body)
        .into_iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let fields = capture_labeled_fields(block, &REPORT_FIELDS);
            let report = DiagnosticReport {
                name: block_title(block, &REPORT_FIELDS),
                purpose: field(&fields, headings::PURPOSE),
                benefits: field(&fields, headings::BENEFITS),
                analysis_details: field(&fields, headings::ANALYSIS_DETAILS),
                preparation_required: field(&fields, headings::PREPARATION_REQUIRED),
                recommendation_reason: field(&fields, headings::RECOMMENDATION_REASON),
            };

            let filled = report.filled_fields();
            if normalize_field(&report.name).is_empty() || filled < MIN_REPORT_FIELDS {
                debug!(
                    block = index + 1,
                    fields = filled,
                    required = MIN_REPORT_FIELDS,
                    "skipping report block"
                );
                return None;
            }
            Some(report)
        })
        .collect()
}

/// A labelled field, or `None` when nothing but markdown markers follows its label.
fn field(fields: &LabeledFields, label: &str) -> Option<String> {
    fields
        .get(label)
        .map(enumerate_field_value)
        .filter(|value| !normalize_field(value).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_needs_three_fields() {
        let body = "1. Complete Blood Count
- Purpose: Detect infection
- Benefits: Early detection
- Analysis Details: Counts red and white cells
2. Vitamin D Test
- Purpose: Check deficiency
- Benefits: Guides supplementation";

        let reports = extract_reports(body);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "Complete Blood Count");
        assert_eq!(reports[0].purpose.as_deref(), Some("Detect infection"));
        assert_eq!(
            reports[0].analysis_details.as_deref(),
            Some("Counts red and white cells")
        );
        assert_eq!(reports[0].preparation_required, None);
    }

    #[test]
    fn test_multi_line_fields_are_enumerated() {
        let body = "1. Lipid Profile
- Purpose: Measure cholesterol
- Preparation Required:
  - Fast for 12 hours
  - Avoid alcohol
- Recommendation Reason: Family history of heart disease";

        let reports = extract_reports(body);

        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].preparation_required.as_deref(),
            Some("1. Fast for 12 hours\n2. Avoid alcohol")
        );
    }

    #[test]
    fn test_marker_only_fields_do_not_count() {
        let body = "1. Thyroid Panel
- Purpose: **
- Benefits: Explains fatigue
- Analysis Details: TSH, T3 and T4 levels";

        assert!(extract_reports(body).is_empty());
    }

    #[test]
    fn test_plain_numbered_lines_are_not_reports() {
        let body = "1. Blood test\n2. Urine test\n3. X-ray";
        assert!(extract_reports(body).is_empty());
    }
}
