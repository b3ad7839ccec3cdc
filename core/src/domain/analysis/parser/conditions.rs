//! Condition extraction: a three-tier chain for the condition list followed by
//! a per-condition lookup of the `<NAME> RECOMMENDED ACTIONS:` and
//! `<NAME> PREVENTIVE MEASURES:` sub-sections.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::{
    ParseError,
    blocks::split_numbered_blocks,
    lists::extract_list_items,
    normalize::normalize_field,
    sections::{self, SectionMap},
};
use crate::domain::analysis::{
    entities::{Condition, ConditionDetail, PartialAnalysis},
    headings,
};

/// `Name (Probability: NN%): description` at the start of a block. The name
/// may itself carry a parenthetical, e.g. `Migraine (Chronic)`.
static CONDITION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:\d+\.\s*)?((?:[^(\n]|\([^)\n]*\))+?)\s*\(\s*(?i:probability)\s*:?\s*(\d+)\s*%\s*\)[ \t]*:?[ \t]*([^\n]*)",
    )
    .unwrap()
});

/// Numbered line with a bare `(NN%)` or `(Probability NN%)`.
static LOOSE_CONDITION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*\d+\.[ \t]*([^(\r\n]+?)[ \t]*\((?i:probability)?[ \t]*:?[ \t]*(\d+)[ \t]*%[ \t]*\)([^:\r\n]*):?([^\r\n]*)",
    )
    .unwrap()
});

static ACTIONS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+RECOMMENDED\s+ACTIONS$").unwrap());

/// Any line opening a condition sub-section, whatever its case.
static DETAIL_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*[#*]*[ \t]*[a-z][^\n:]*?(?:recommended[ \t]+actions|preventive[ \t]+measures)[ \t]*\**[ \t]*:",
    )
    .unwrap()
});

static NUMBERED_CONDITION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\d+\.[^\n]*\(\s*(?i:probability)?\s*:?\s*\d+\s*%\s*\)").unwrap()
});

/// Where the condition list is read from, in the order the sources are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionTier {
    /// Numbered blocks of the dedicated POSSIBLE CONDITIONS body.
    DedicatedSection,
    /// Looser numbered lines in the generically split POSSIBLE CONDITIONS section.
    LooseSection,
    /// Names inferred from `<NAME> RECOMMENDED ACTIONS` headings.
    HeadingInference,
}

impl ConditionTier {
    pub const ORDERED: [ConditionTier; 3] = [
        ConditionTier::DedicatedSection,
        ConditionTier::LooseSection,
        ConditionTier::HeadingInference,
    ];

    pub fn extract(&self, raw: &str, sections: &SectionMap) -> Result<Vec<Condition>, ParseError> {
        match self {
            ConditionTier::DedicatedSection => Ok(dedicated_section_conditions(raw)),
            ConditionTier::LooseSection => Ok(loose_section_conditions(sections)),
            ConditionTier::HeadingInference => heading_inferred_conditions(raw, sections),
        }
    }
}

/// Fills `analysis.conditions` from the first tier that finds any, then looks
/// up each condition's sub-sections.
pub fn extract_conditions(
    raw: &str,
    sections: &SectionMap,
    analysis: &mut PartialAnalysis,
) -> Result<(), ParseError> {
    for tier in ConditionTier::ORDERED {
        let found = tier.extract(raw, sections)?;
        if found.is_empty() {
            debug!(?tier, "no conditions found");
            continue;
        }

        debug!(?tier, conditions = found.len(), "extracted conditions");
        for condition in found {
            analysis.push_condition(condition);
        }
        break;
    }

    for entry in &mut analysis.conditions {
        entry.detail = extract_condition_detail(raw, &entry.condition.name)?;
    }

    Ok(())
}

fn dedicated_section_conditions(raw: &str) -> Vec<Condition> {
    let Some(body) = sections::possible_conditions_body(raw) else {
        return Vec::new();
    };

    split_numbered_blocks(body)
        .into_iter()
        .enumerate()
        .filter_map(|(index, block)| match CONDITION_LINE.captures(block) {
            Some(caps) => condition_from(&caps[1], &caps[2], &caps[3]),
            None => {
                debug!(block = index + 1, "skipping block without a condition line");
                None
            }
        })
        .collect()
}

fn loose_section_conditions(sections: &SectionMap) -> Vec<Condition> {
    let Some(body) = sections.get(headings::POSSIBLE_CONDITIONS) else {
        return Vec::new();
    };

    let matches: Vec<Captures> = LOOSE_CONDITION_LINE.captures_iter(body).collect();
    matches
        .iter()
        .enumerate()
        .filter_map(|(index, caps)| {
            let line_end = caps.get(0)?.end();
            let next_start = matches
                .get(index + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(body.len());

            let description = [&caps[3], &caps[4], &body[line_end..next_start]]
                .into_iter()
                .map(|part| part.trim().trim_start_matches(['-', ':']).trim())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");

            condition_from(&caps[1], &caps[2], &description)
        })
        .collect()
}

fn heading_inferred_conditions(raw: &str, sections: &SectionMap) -> Result<Vec<Condition>, ParseError> {
    let mut conditions: Vec<Condition> = Vec::new();

    for section in sections.iter() {
        let Some(caps) = ACTIONS_LABEL.captures(&section.label) else {
            continue;
        };
        let hint = caps[1].trim();

        let backfill = Regex::new(&format!(
            r"(?im)^[ \t]*\d+\.[ \t]*\**[ \t]*({})\**[^\n(]*\(\s*(?:probability\s*:?\s*)?(\d+)\s*%\s*\)[ \t]*:?[ \t]*([^\n]*)",
            flexible_words(hint)
        ))?;

        let condition = match backfill.captures(raw) {
            Some(found) => condition_from(&found[1], &found[2], &found[3]),
            None => condition_from(hint, "0", ""),
        };

        if let Some(condition) = condition
            && !conditions
                .iter()
                .any(|known| known.name.eq_ignore_ascii_case(&condition.name))
        {
            debug!(condition = %condition.name, "inferred condition from sub-section heading");
            conditions.push(condition);
        }
    }

    Ok(conditions)
}

fn condition_from(name: &str, probability: &str, description: &str) -> Option<Condition> {
    let name = normalize_field(name);
    if name.is_empty() {
        return None;
    }

    let probability = probability.parse::<u32>().map_or(100, |p| p.min(100) as u8);
    Some(Condition::new(name, probability, normalize_field(description)))
}

/// Recommended actions and preventive measures listed under a condition's own
/// sub-headings. The full name is tried first, then the name without any
/// trailing parenthetical.
pub fn extract_condition_detail(raw: &str, name: &str) -> Result<ConditionDetail, ParseError> {
    let mut detail = ConditionDetail::default();

    for candidate in name_candidates(name) {
        if detail.recommended_actions.is_empty() {
            detail.recommended_actions =
                detail_items(raw, &candidate, headings::CONDITION_ACTIONS_SUFFIX)?;
        }
        if detail.preventive_measures.is_empty() {
            detail.preventive_measures =
                detail_items(raw, &candidate, headings::CONDITION_PREVENTION_SUFFIX)?;
        }
    }

    debug!(
        condition = %name,
        actions = detail.recommended_actions.len(),
        measures = detail.preventive_measures.len(),
        "extracted condition detail"
    );
    Ok(detail)
}

fn name_candidates(name: &str) -> Vec<String> {
    let mut candidates = vec![name.to_string()];

    if let Some((base, _)) = name.split_once('(') {
        let base = base.trim();
        if !base.is_empty() && base != name {
            candidates.push(base.to_string());
        }
    }

    candidates
}

fn detail_items(raw: &str, name: &str, suffix: &str) -> Result<Vec<String>, ParseError> {
    let heading = Regex::new(&format!(
        r"(?im)^[ \t]*[#*]*[ \t]*{}[ \t]*\**[ \t]*{}[ \t]*\**[ \t]*:\**",
        flexible_words(name),
        flexible_words(suffix)
    ))?;

    let Some(found) = heading.find(raw) else {
        return Ok(Vec::new());
    };

    let start = found.end();
    let end = [&*DETAIL_HEADING, &*NUMBERED_CONDITION_START]
        .into_iter()
        .filter_map(|boundary| boundary.find_at(raw, start).map(|m| m.start()))
        .chain(sections::find_heading_at(raw, start))
        .min()
        .unwrap_or(raw.len());

    Ok(extract_list_items(&raw[start..end]))
}

/// Escapes each word and lets any whitespace run separate them.
fn flexible_words(text: &str) -> String {
    text.split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}
