use crate::domain::analysis::entities::{
    AyurvedicAdvice, Condition, ConditionDetail, DiagnosticReport, MealPlan, Urgency,
};

/// Position of a condition in extraction order.
///
/// Condition details are joined to their condition through this id rather
/// than through the free-text name, so a heading spelled slightly differently
/// from the condition line cannot attach details to the wrong entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConditionId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedCondition {
    pub id: ConditionId,
    pub condition: Condition,
    pub detail: ConditionDetail,
}

impl IdentifiedCondition {
    pub fn new(id: ConditionId, condition: Condition) -> Self {
        Self {
            id,
            condition,
            detail: ConditionDetail::default(),
        }
    }
}

/// What extraction managed to recover. Empty strings, empty lists and `None`
/// all mean "not found" and are filled in by the completeness pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAnalysis {
    pub conditions: Vec<IdentifiedCondition>,
    pub recommendation: String,
    pub urgency: Option<Urgency>,
    pub follow_up_actions: Vec<String>,
    pub risk_factors: Vec<String>,
    pub meal_recommendations: MealPlan,
    pub exercise_plan: Vec<String>,
    pub diseases: Vec<String>,
    pub preventive_measures: Vec<String>,
    pub medicine_recommendations: Vec<String>,
    pub ayurvedic_medication: AyurvedicAdvice,
    pub dos: Vec<String>,
    pub donts: Vec<String>,
    pub reports_required: Vec<DiagnosticReport>,
    pub health_score: Option<u8>,
}

impl PartialAnalysis {
    /// Appends a condition, assigning it the next id.
    pub fn push_condition(&mut self, condition: Condition) -> ConditionId {
        let id = ConditionId(self.conditions.len());
        self.conditions.push(IdentifiedCondition::new(id, condition));
        id
    }
}
