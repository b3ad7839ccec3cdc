use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::analysis::headings;

/// Upper-case words (apostrophes and hyphens allowed) at line start followed
/// by a colon, optionally wrapped in markdown markers. The rest of the line is
/// captured so [`next_heading`] can tell headings from inline `LDL: ...` text.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*[#*]*[ \t]*([A-Z][A-Z'’ \t-]*[A-Z'’])[ \t]*\**[ \t]*:\**[ \t]*([^\r\n]*)",
    )
    .unwrap()
});

static POSSIBLE_CONDITIONS_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)POSSIBLE[ \t]+CONDITIONS[ \t]*\**[ \t]*:\**").unwrap()
});

static RECOMMENDATION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*[#*]*[ \t]*RECOMMENDATION[ \t]*\**[ \t]*:").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Upper-case label with whitespace collapsed and typographic apostrophes
    /// folded to `'`.
    pub label: String,
    pub body: String,
}

/// Sections of a reply, in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    /// Splits `text` on every recognised heading. Text before the first
    /// heading is ignored.
    pub fn split(text: &str) -> Self {
        let found: Vec<HeadingMatch> =
            std::iter::successors(next_heading(text, 0), |previous| {
                next_heading(text, previous.body_start)
            })
            .collect();

        let sections: Vec<Section> = found
            .iter()
            .enumerate()
            .map(|(index, heading)| {
                let body_end = found
                    .get(index + 1)
                    .map(|next| next.start)
                    .unwrap_or(text.len());

                Section {
                    label: heading.label.clone(),
                    body: text[heading.body_start..body_end].trim().to_string(),
                }
            })
            .collect();

        debug!(
            sections = sections.len(),
            labels = ?sections.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
            "split reply into sections"
        );

        Self { sections }
    }

    /// Body of the last section carrying `label`, if it has any content.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .rev()
            .find(|section| section.label == label)
            .map(|section| section.body.as_str())
            .filter(|body| !body.is_empty())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// The POSSIBLE CONDITIONS body, running up to the RECOMMENDATION heading
/// rather than the next generic heading so per-condition sub-headings stay
/// inside it.
pub fn possible_conditions_body(text: &str) -> Option<&str> {
    let start = POSSIBLE_CONDITIONS_START.find(text)?.end();
    let end = RECOMMENDATION_HEADING
        .find_at(text, start)
        .map(|m| m.start())
        .unwrap_or(text.len());

    let body = text[start..end].trim();
    (!body.is_empty()).then_some(body)
}

/// A recognised heading: where its line starts, where its body starts and its
/// normalized label.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeadingMatch {
    start: usize,
    body_start: usize,
    label: String,
}

/// The first heading at or after `from`.
///
/// A heading must end its line. Text after the colon is only accepted for
/// the known section labels, the upper-case meal labels and per-condition
/// sub-headings, so lines such as `LDL: under 100` stay inside their body.
fn next_heading(text: &str, from: usize) -> Option<HeadingMatch> {
    let mut at = from;

    while let Some(caps) = HEADING.captures_at(text, at) {
        let whole = caps.get(0)?;
        let rest = caps.get(2)?;
        let label = normalize_label(caps.get(1)?.as_str());

        let ends_line = rest
            .as_str()
            .trim_matches(|c: char| c == '*' || c.is_whitespace())
            .is_empty();
        if ends_line || allows_inline_body(&label) {
            return Some(HeadingMatch {
                start: whole.start(),
                body_start: rest.start(),
                label,
            });
        }

        at = whole.end();
    }

    None
}

/// Start of the first heading at or after `from`.
pub(super) fn find_heading_at(text: &str, from: usize) -> Option<usize> {
    next_heading(text, from).map(|heading| heading.start)
}

fn allows_inline_body(label: &str) -> bool {
    headings::SECTION_HEADINGS.contains(&label)
        || headings::MEAL_LABELS
            .iter()
            .any(|meal| meal.to_uppercase() == label)
        || label.ends_with(headings::CONDITION_ACTIONS_SUFFIX)
        || label.ends_with(headings::CONDITION_PREVENTION_SUFFIX)
}

fn normalize_label(label: &str) -> String {
    label
        .replace('’', "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_reads_bodies_between_headings() {
        let text = "Intro text\nRECOMMENDATION:\nRest well.\nURGENCY LEVEL:\nlow\n";
        let sections = SectionMap::split(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get(headings::RECOMMENDATION), Some("Rest well."));
        assert_eq!(sections.get(headings::URGENCY_LEVEL), Some("low"));
    }

    #[test]
    fn test_split_recognises_hyphens_apostrophes_and_markdown() {
        let text = "## FOLLOW-UP ACTIONS:\n1. Call\n**DO’S:**\n1. Walk\nDON'TS:\n1. Smoke";
        let sections = SectionMap::split(text);

        assert_eq!(sections.get(headings::FOLLOW_UP_ACTIONS), Some("1. Call"));
        assert_eq!(sections.get(headings::DOS), Some("1. Walk"));
        assert_eq!(sections.get(headings::DONTS), Some("1. Smoke"));
    }

    #[test]
    fn test_repeated_heading_last_wins() {
        let text = "RISK FACTORS:\nfirst\nRISK FACTORS:\nsecond";
        let sections = SectionMap::split(text);

        assert_eq!(sections.get(headings::RISK_FACTORS), Some("second"));
    }

    #[test]
    fn test_missing_or_empty_section_is_absent() {
        let sections = SectionMap::split("RECOMMENDATION:\n\nURGENCY LEVEL:\nhigh");

        assert_eq!(sections.get(headings::RECOMMENDATION), None);
        assert_eq!(sections.get(headings::HEALTH_SCORE), None);
        assert!(!sections.contains(headings::DOS));
    }

    #[test]
    fn test_inline_abbreviations_stay_in_body() {
        let text = "REPORTS REQUIRED:
1. Lipid Profile
- Analysis Details:
LDL: should be under 100
HDL: above 40 is protective
HEALTH SCORE:
7/10";
        let sections = SectionMap::split(text);

        assert_eq!(sections.len(), 2);
        let body = sections.get(headings::REPORTS_REQUIRED).unwrap();
        assert!(body.contains("LDL: should be under 100"));
        assert!(body.ends_with("HDL: above 40 is protective"));
        assert_eq!(sections.get(headings::HEALTH_SCORE), Some("7/10"));
    }

    #[test]
    fn test_known_sections_keep_same_line_bodies() {
        let text = "URGENCY LEVEL: high\n**HEALTH SCORE:** 6/10\nBREAKFAST: Poha\nBP: 120/80";
        let sections = SectionMap::split(text);

        assert_eq!(sections.get(headings::URGENCY_LEVEL), Some("high"));
        assert_eq!(sections.get("BREAKFAST"), Some("Poha\nBP: 120/80"));
        assert_eq!(sections.get(headings::HEALTH_SCORE), Some("6/10"));
        assert!(!sections.contains("BP"));
        assert_eq!(find_heading_at(text, 1), Some(text.find("**HEALTH").unwrap()));
    }

    #[test]
    fn test_mixed_case_lines_are_not_headings() {
        let sections = SectionMap::split("Breakfast: poha\nLunch: dal");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_possible_conditions_body_keeps_condition_sub_headings() {
        let text = "POSSIBLE CONDITIONS:\n1. Flu (Probability: 80%): viral\n\
                    FLU RECOMMENDED ACTIONS:\n- Rest\nRECOMMENDATION:\nSleep";
        let body = possible_conditions_body(text).unwrap();

        assert!(body.starts_with("1. Flu"));
        assert!(body.contains("FLU RECOMMENDED ACTIONS:"));
        assert!(!body.contains("Sleep"));
    }

    #[test]
    fn test_possible_conditions_body_runs_to_end_without_recommendation() {
        let body = possible_conditions_body("POSSIBLE CONDITIONS:\n1. Cold").unwrap();
        assert_eq!(body, "1. Cold");
        assert_eq!(possible_conditions_body("nothing here"), None);
    }
}
