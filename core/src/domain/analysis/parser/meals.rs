use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{
    blocks::{capture_labeled_fields, label_pattern},
    lists::extract_list_items,
    sections::SectionMap,
};
use crate::domain::analysis::{entities::MealPlan, headings};

static MEAL_FIELDS: LazyLock<Regex> =
    LazyLock::new(|| label_pattern(&headings::MEAL_LABELS).unwrap());

/// The closing sentence naming the diet preference the plan was built for.
static MEAL_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    let opening = headings::MEAL_NOTE_OPENING
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"(?i){opening}[^\n]*?diet\s+preference[^\n]*\.")).unwrap()
});

/// Reads breakfast, lunch and dinner from the meal section. Upper-cased meal
/// labels end up as sections of their own, so those are read as a fallback.
pub fn extract_meal_plan(sections: &SectionMap) -> MealPlan {
    let body = sections.get(headings::MEAL_RECOMMENDATIONS).unwrap_or_default();
    let note = MEAL_NOTE.find(body).map(|m| m.as_str().to_string());
    let without_note = MEAL_NOTE.replace_all(body, "");
    let fields = capture_labeled_fields(&without_note, &MEAL_FIELDS);

    let meal = |label: &str| {
        let text = fields
            .get(label)
            .map(str::to_string)
            .or_else(|| {
                sections
                    .get(&label.to_uppercase())
                    .map(|text| MEAL_NOTE.replace_all(text, "").into_owned())
            })
            .unwrap_or_default();
        extract_list_items(&text)
    };

    let plan = MealPlan {
        breakfast: meal(headings::BREAKFAST),
        lunch: meal(headings::LUNCH),
        dinner: meal(headings::DINNER),
        note: note
            .or_else(|| {
                sections
                    .get(&headings::DINNER.to_uppercase())
                    .and_then(|text| MEAL_NOTE.find(text))
                    .map(|m| m.as_str().to_string())
            })
            .unwrap_or_default(),
    };

    debug!(
        breakfast = plan.breakfast.len(),
        lunch = plan.lunch.len(),
        dinner = plan.dinner.len(),
        has_note = !plan.note.is_empty(),
        "extracted meal plan"
    );
    plan
}
