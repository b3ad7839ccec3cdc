use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::normalize::normalize_items;

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]*(\S[^\n]*)").unwrap());

static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*•][ \t]*").unwrap());

const SHORT_LIST_MAX_LINES: usize = 8;
const LONG_LINE_CHARS: usize = 100;

/// Ways a list can be read out of a section body, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStrategy {
    /// `1. item` lines.
    Numbered,
    /// `- item`, `* item` or `• item`, each running up to the next marker.
    Bulleted,
    /// Every non-empty line, when the body is short or holds prose-length lines.
    ShortLines,
    /// Non-empty lines that do not look like headings or single words.
    FilteredLines,
}

impl ListStrategy {
    pub const ORDERED: [ListStrategy; 4] = [
        ListStrategy::Numbered,
        ListStrategy::Bulleted,
        ListStrategy::ShortLines,
        ListStrategy::FilteredLines,
    ];

    /// Raw, un-normalized items this strategy finds in `text`.
    pub fn extract<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            ListStrategy::Numbered => NUMBERED_ITEM
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .collect(),
            ListStrategy::Bulleted => bulleted_items(text),
            ListStrategy::ShortLines => {
                let lines = non_empty_lines(text);
                let short = lines.len() < SHORT_LIST_MAX_LINES
                    || lines.iter().any(|line| line.chars().count() > LONG_LINE_CHARS);
                if short { lines } else { Vec::new() }
            }
            ListStrategy::FilteredLines => non_empty_lines(text)
                .into_iter()
                .filter(|line| !looks_like_heading(line))
                .filter(|line| line.split_whitespace().nth(1).is_some())
                .collect(),
        }
    }
}

/// Reads `text` as an ordered list using the first strategy that yields a
/// non-empty item. Never fails; an unreadable body gives an empty list.
pub fn extract_list_items(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    for strategy in ListStrategy::ORDERED {
        let items = normalize_items(strategy.extract(text));
        if !items.is_empty() {
            debug!(?strategy, items = items.len(), "extracted list items");
            return items;
        }
    }

    debug!("no list items found");
    Vec::new()
}

fn bulleted_items(text: &str) -> Vec<&str> {
    let markers: Vec<(usize, usize)> = BULLET_MARKER
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(index, (_, start))| {
            let end = markers
                .get(index + 1)
                .map(|(next, _)| *next)
                .unwrap_or(text.len());
            text[*start..end].trim()
        })
        .collect()
}

fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn looks_like_heading(line: &str) -> bool {
    let all_caps = line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase);
    all_caps || line.ends_with(':')
}
