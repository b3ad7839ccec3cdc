//! Primitives for repeated multi-field records: a section body made of
//! numbered blocks, each with a title line and labelled sub-fields such as
//! `- Purpose: ...`.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use super::lists::ListStrategy;

static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n\s*\d+\.").unwrap());

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s*").unwrap());

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.").unwrap());

static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*•]").unwrap());

/// Splits a section body into its numbered blocks. The first fragment keeps
/// its own leading `1.` when the body starts with one; an empty leading
/// fragment is dropped.
pub fn split_numbered_blocks(body: &str) -> Vec<&str> {
    BLOCK_SEPARATOR
        .split(body)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Builds a pattern matching any of `labels` in field position: at line start
/// (optionally after a bullet) or inline after a dash, followed by a colon.
/// Words inside a label match any whitespace run, case-insensitively.
pub fn label_pattern(labels: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives = labels
        .iter()
        .map(|label| {
            label
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(
        r"(?im)(?:^[ \t]*(?:[-*•][ \t]*)?|[-•][ \t]*)\**(?P<label>{alternatives})\**[ \t]*:"
    ))
}

/// The block's name: its first line without numbering, cut before any
/// labelled field sharing the line.
pub fn block_title(block: &str, labels: &Regex) -> String {
    let first_line = block.lines().next().unwrap_or_default();
    let line = LEADING_NUMBER.replace(first_line, "");

    let cut = labels
        .find(&line)
        .map(|m| m.start())
        .unwrap_or(line.len());

    line[..cut]
        .trim_end_matches(|c: char| c == ':' || c == '-' || c == '*' || c.is_whitespace())
        .trim_start_matches(|c: char| c == '*' || c.is_whitespace())
        .to_string()
}

/// Sub-fields found in one block, keyed by their lower-cased label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledFields {
    fields: HashMap<String, String>,
}

impl LabeledFields {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .get(&label_key(label))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.values().filter(|value| !value.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Captures each labelled field from its label up to the next known label or
/// the end of the block. When a label repeats, the first occurrence wins.
pub fn capture_labeled_fields(block: &str, labels: &Regex) -> LabeledFields {
    let found: Vec<(String, usize, usize)> = labels
        .captures_iter(block)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.name("label")?;
            Some((label_key(label.as_str()), whole.start(), whole.end()))
        })
        .collect();

    let mut fields = HashMap::new();
    for (index, (key, _, value_start)) in found.iter().enumerate() {
        let value_end = found
            .get(index + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(block.len());

        fields
            .entry(key.clone())
            .or_insert_with(|| block[*value_start..value_end].trim().to_string());
    }

    LabeledFields { fields }
}

/// Rewrites a multi-item field body as an inline enumeration (`1. a\n2. b`)
/// so the items stay distinguishable once whitespace is collapsed. Bodies
/// that are already numbered, or hold a single item, are returned as is.
pub fn enumerate_field_value(value: &str) -> String {
    let value = value.trim();
    if NUMBERED_LINE.is_match(value) {
        return value.to_string();
    }

    let bullets = ListStrategy::Bulleted.extract(value);
    let (lead, items): (&str, Vec<&str>) = if bullets.is_empty() {
        ("", value.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
    } else {
        let lead = BULLET_LINE
            .find(value)
            .map(|m| &value[..m.start()])
            .unwrap_or_default();
        (lead.trim(), bullets.into_iter().filter(|b| !b.is_empty()).collect())
    };

    if items.len() < 2 {
        return value.to_string();
    }

    let enumerated = items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}. {}", index + 1, item))
        .collect::<Vec<_>>()
        .join("\n");

    if lead.is_empty() {
        enumerated
    } else {
        format!("{lead}\n{enumerated}")
    }
}

fn label_key(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_labels() -> Regex {
        label_pattern(&["Purpose", "Benefits", "Analysis Details"]).unwrap()
    }

    #[test]
    fn test_split_numbered_blocks_drops_empty_lead() {
        let body = "\n1. Alpha\n- Purpose: a\n2. Beta\n   3. Gamma";
        assert_eq!(
            split_numbered_blocks(body),
            vec!["Alpha\n- Purpose: a", "Beta", "Gamma"]
        );
    }

    #[test]
    fn test_first_block_keeps_its_number() {
        let body = "1. Alpha\n2. Beta";
        let blocks = split_numbered_blocks(body);

        assert_eq!(blocks, vec!["1. Alpha", "Beta"]);
        assert_eq!(block_title(blocks[0], &report_labels()), "Alpha");
    }

    #[test]
    fn test_block_title_cuts_inline_fields() {
        let labels = report_labels();
        assert_eq!(
            block_title("Thyroid Panel - Purpose: check TSH", &labels),
            "Thyroid Panel"
        );
        assert_eq!(block_title("**Lipid Profile**:\n- Benefits: x", &labels), "Lipid Profile");
    }

    #[test]
    fn test_capture_labeled_fields_until_next_label() {
        let block = "Complete Blood Count\n- Purpose: Detect infection\n  and anaemia\n\
                     - **Benefits**: Early detection\n- analysis   details: Counts cells";
        let fields = capture_labeled_fields(block, &report_labels());

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("Purpose"), Some("Detect infection\n  and anaemia"));
        assert_eq!(fields.get("Benefits"), Some("Early detection"));
        assert_eq!(fields.get("Analysis Details"), Some("Counts cells"));
    }

    #[test]
    fn test_first_occurrence_of_label_wins() {
        let block = "X\n- Purpose: first\n- Purpose: second";
        let fields = capture_labeled_fields(block, &report_labels());

        assert_eq!(fields.get("purpose"), Some("first"));
    }

    #[test]
    fn test_empty_fields_do_not_count() {
        let block = "X\n- Purpose:\n- Benefits: real";
        let fields = capture_labeled_fields(block, &report_labels());

        assert_eq!(fields.get("Purpose"), None);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_enumerate_field_value() {
        assert_eq!(enumerate_field_value("- Fasting\n- Water only"), "1. Fasting\n2. Water only");
        assert_eq!(enumerate_field_value("Line one\nLine two"), "1. Line one\n2. Line two");
        assert_eq!(enumerate_field_value("Fast for 12 hours"), "Fast for 12 hours");
        assert_eq!(enumerate_field_value("1. a\n2. b"), "1. a\n2. b");
        assert_eq!(
            enumerate_field_value("Before the test:\n- Fast\n- Rest"),
            "Before the test:\n1. Fast\n2. Rest"
        );
    }
}
