use std::future::Future;

use crate::domain::{
    analysis::{
        entities::{AnalysisRecord, QuickAnalysis},
        value_objects::{
            AnalyzeSymptomsInput, FollowUpAnalysisInput, GenerationSettings, QuickAnalyzeInput,
        },
    },
    common::entities::app_errors::CoreError,
};

/// Text generation backend
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends a fully rendered prompt and returns the raw reply text.
    fn generate_text(
        &self,
        prompt: String,
        settings: GenerationSettings,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for symptom analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait SymptomAnalysisService: Send + Sync {
    fn analyze_symptoms(
        &self,
        input: AnalyzeSymptomsInput,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;

    fn quick_analyze(
        &self,
        input: QuickAnalyzeInput,
    ) -> impl Future<Output = Result<QuickAnalysis, CoreError>> + Send;

    fn analyze_follow_up(
        &self,
        input: FollowUpAnalysisInput,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;
}
