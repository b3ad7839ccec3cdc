use serde::{Deserialize, Serialize};

use crate::domain::analysis::entities::Urgency;

/// Short-form analysis: condition names only, one recommendation paragraph
/// and an urgency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAnalysis {
    pub possible_conditions: Vec<String>,
    pub recommendation: String,
    pub urgency: Urgency,
}
