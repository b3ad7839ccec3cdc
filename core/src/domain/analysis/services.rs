use tracing::{debug, error, info};

use crate::domain::{
    analysis::{
        entities::{AnalysisRecord, QuickAnalysis},
        fallbacks::GenerationFailure,
        parser::{parse_analysis_response, quick::parse_quick_response},
        policies::ensure_valid_symptoms,
        ports::{LLMClient, SymptomAnalysisService},
        prompts::{render_analysis_prompt, render_follow_up_prompt, render_quick_prompt},
        value_objects::{
            AnalyzeSymptomsInput, FollowUpAnalysisInput, GenerationSettings, QuickAnalyzeInput,
        },
    },
    common::{
        entities::app_errors::CoreError, generate_response_id, generate_uuid_v7, services::Service,
    },
};

const LOGGED_REPLY_LIMIT: usize = 2000;
const LOGGED_REPLY_EDGE: usize = 1000;

impl<LLM> SymptomAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn analyze_symptoms(
        &self,
        input: AnalyzeSymptomsInput,
    ) -> Result<AnalysisRecord, CoreError> {
        let request_id = generate_uuid_v7();
        info!(
            %request_id,
            requester = input.requester.as_deref().unwrap_or("anonymous"),
            symptoms = input.symptoms.len(),
            "analyzing symptoms"
        );

        // 1. Validate symptoms
        ensure_valid_symptoms(&input.symptoms)?;

        // 2. Render prompt
        let prompt = render_analysis_prompt(&input);

        // 3. Call the generator
        let reply = match self
            .llm_client
            .generate_text(prompt, GenerationSettings::full_analysis())
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!(%request_id, "Failed to generate analysis: {}", e);
                return Ok(GenerationFailure::classify(&e).record());
            }
        };

        // 4. Parse the reply
        log_raw_reply("analyze", &reply);
        let record = parse_analysis_response(&reply);

        info!(
            %request_id,
            conditions = record.possible_conditions.len(),
            urgency = %record.urgency,
            "symptom analysis complete"
        );

        Ok(record)
    }

    async fn quick_analyze(&self, input: QuickAnalyzeInput) -> Result<QuickAnalysis, CoreError> {
        let request_id = generate_uuid_v7();
        info!(
            %request_id,
            requester = input.requester.as_deref().unwrap_or("anonymous"),
            age = ?input.age,
            "quick analyzing symptoms"
        );

        // 1. Validate input
        if input.symptoms.trim().is_empty() {
            return Err(CoreError::Invalid("Please provide symptoms".to_string()));
        }

        // 2. Call the generator
        let prompt = render_quick_prompt(&input);
        let reply = match self
            .llm_client
            .generate_text(prompt, GenerationSettings::quick_analysis())
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!(%request_id, "Failed to generate quick analysis: {}", e);
                return Ok(GenerationFailure::classify(&e).quick());
            }
        };

        // 3. Parse the reply
        log_raw_reply("quick", &reply);
        let analysis = parse_quick_response(&reply);

        info!(
            %request_id,
            conditions = analysis.possible_conditions.len(),
            urgency = %analysis.urgency,
            "quick analysis complete"
        );

        Ok(analysis)
    }

    async fn analyze_follow_up(
        &self,
        input: FollowUpAnalysisInput,
    ) -> Result<AnalysisRecord, CoreError> {
        let request_id = generate_uuid_v7();
        info!(
            %request_id,
            requester = input.requester.as_deref().unwrap_or("anonymous"),
            previous_conditions = input.previous_analysis.possible_conditions.len(),
            document_chars = input.document_text.len(),
            "analyzing follow-up document"
        );

        // 1. Validate input
        if !input.reported_symptoms.is_empty() {
            ensure_valid_symptoms(&input.reported_symptoms)?;
        }
        if input.document_text.trim().is_empty() && input.reported_symptoms.is_empty() {
            return Err(CoreError::Invalid(
                "Please provide a document or updated symptoms".to_string(),
            ));
        }

        // 2. Call the generator
        let prompt = render_follow_up_prompt(&input);
        let reply = match self
            .llm_client
            .generate_text(prompt, GenerationSettings::full_analysis())
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!(%request_id, "Failed to generate follow-up analysis: {}", e);
                return Ok(GenerationFailure::classify(&e).record());
            }
        };

        // 3. Parse the reply
        log_raw_reply("follow_up", &reply);
        let record = parse_analysis_response(&reply);

        info!(
            %request_id,
            conditions = record.possible_conditions.len(),
            urgency = %record.urgency,
            "follow-up analysis complete"
        );

        Ok(record)
    }
}

fn log_raw_reply(kind: &str, reply: &str) {
    debug!(
        target: "gemini_response",
        response_id = %generate_response_id(kind),
        reply = %condense_reply(reply),
        "raw generator reply"
    );
}

/// Collapses a reply onto one line and keeps only its head and tail when it
/// is longer than the log limit.
fn condense_reply(reply: &str) -> String {
    let single_line = reply.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars = single_line.chars().count();

    if chars <= LOGGED_REPLY_LIMIT {
        return single_line;
    }

    let head: String = single_line.chars().take(LOGGED_REPLY_EDGE).collect();
    let tail: String = single_line
        .chars()
        .skip(chars - LOGGED_REPLY_EDGE)
        .collect();
    format!("{head} ... [truncated] ... {tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{
        entities::{ERROR_CATEGORY, Urgency},
        fallbacks::{API_ERROR_CONDITION, QUICK_API_ERROR_CONDITION, QUOTA_EXCEEDED_CONDITION},
        parser::completeness::ensure_complete,
        ports::MockLLMClient,
        value_objects::Symptom,
    };

    const REPLY: &str = "POSSIBLE CONDITIONS:
1. Tension Headache (Probability: 60%): Muscle tension around the head.

TENSION HEADACHE RECOMMENDED ACTIONS:
1. Rest
2. Hydrate

RECOMMENDATION:
Rest and drink water.

URGENCY LEVEL:
low

HEALTH SCORE:
7/10 - Mostly healthy.
";

    fn input() -> AnalyzeSymptomsInput {
        AnalyzeSymptomsInput {
            requester: Some("user-1".to_string()),
            symptoms: vec![Symptom::new("Headache", 4, "2 days")],
            ..Default::default()
        }
    }

    fn replying(reply: &'static str) -> Service<MockLLMClient> {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text()
            .times(1)
            .returning(move |_, _| Box::pin(async move { Ok(reply.to_string()) }));
        Service::new(llm)
    }

    fn failing(error: fn() -> CoreError) -> Service<MockLLMClient> {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text()
            .times(1)
            .returning(move |_, _| Box::pin(async move { Err(error()) }));
        Service::new(llm)
    }

    #[tokio::test]
    async fn test_analyze_symptoms_parses_reply() {
        let service = replying(REPLY);

        let record = service.analyze_symptoms(input()).await.unwrap();

        assert_eq!(record.possible_conditions[0].name, "Tension Headache");
        assert_eq!(record.possible_conditions[0].probability, 60);
        assert_eq!(record.urgency, Urgency::Low);
        assert_eq!(record.health_score, 7);
        assert_eq!(
            record.condition_specific_data["Tension Headache"].recommended_actions,
            vec!["Rest", "Hydrate"]
        );
    }

    #[tokio::test]
    async fn test_analyze_symptoms_sends_full_settings() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text()
            .withf(|prompt, settings| {
                prompt.contains("- Headache (Severity: 4/10, Duration: 2 days)")
                    && *settings == GenerationSettings::full_analysis()
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(REPLY.to_string()) }));

        let service = Service::new(llm);
        assert!(service.analyze_symptoms(input()).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_symptoms_never_reach_the_generator() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text().never();
        let service = Service::new(llm);

        let result = service
            .analyze_symptoms(AnalyzeSymptomsInput {
                symptoms: vec![Symptom::new("Fever", 12, "1 day")],
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(message)) if message.contains("Fever")));
    }

    #[tokio::test]
    async fn test_quota_failure_returns_quota_record() {
        let service = failing(|| CoreError::QuotaExceeded("429 Too Many Requests".to_string()));

        let record = service.analyze_symptoms(input()).await.unwrap();

        assert_eq!(record.possible_conditions[0].name, QUOTA_EXCEEDED_CONDITION);
        assert_eq!(record.possible_conditions[0].category, ERROR_CATEGORY);
    }

    #[tokio::test]
    async fn test_api_failure_returns_api_error_record() {
        let service = failing(|| CoreError::ExternalServiceError("connection refused".to_string()));

        let record = service.analyze_symptoms(input()).await.unwrap();

        assert_eq!(record.possible_conditions[0].name, API_ERROR_CONDITION);
        assert!(
            record.possible_conditions[0]
                .description
                .contains("connection refused")
        );
    }

    #[tokio::test]
    async fn test_quick_analyze_rejects_empty_symptoms() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text().never();
        let service = Service::new(llm);

        let result = service
            .quick_analyze(QuickAnalyzeInput {
                symptoms: "   ".to_string(),
                ..Default::default()
            })
            .await;

        assert_eq!(
            result,
            Err(CoreError::Invalid("Please provide symptoms".to_string()))
        );
    }

    #[tokio::test]
    async fn test_quick_analyze_parses_reply() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text()
            .withf(|_, settings| *settings == GenerationSettings::quick_analysis())
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok("POSSIBLE CONDITIONS:\n1. Common Cold\n2. Allergic Rhinitis\n\nRECOMMENDATION:\nRest.\n\nURGENCY LEVEL:\nlow\n".to_string())
                })
            });
        let service = Service::new(llm);

        let analysis = service
            .quick_analyze(QuickAnalyzeInput {
                symptoms: "runny nose".to_string(),
                age: Some(30),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(
            analysis.possible_conditions,
            vec!["Common Cold", "Allergic Rhinitis"]
        );
        assert_eq!(analysis.recommendation, "Rest.");
        assert_eq!(analysis.urgency, Urgency::Low);
    }

    #[tokio::test]
    async fn test_quick_analyze_failure_returns_quick_fallback() {
        let service = failing(|| CoreError::ExternalServiceError("timeout".to_string()));

        let analysis = service
            .quick_analyze(QuickAnalyzeInput {
                symptoms: "cough".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(analysis.possible_conditions, vec![QUICK_API_ERROR_CONDITION]);
        assert_eq!(analysis.urgency, Urgency::Medium);
    }

    #[tokio::test]
    async fn test_follow_up_requires_new_information() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text().never();
        let service = Service::new(llm);

        let result = service
            .analyze_follow_up(FollowUpAnalysisInput {
                requester: None,
                previous_analysis: ensure_complete(Default::default()),
                reported_symptoms: Vec::new(),
                document_text: " ".to_string(),
                diet_preference: "balanced".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_follow_up_parses_reply() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_text()
            .withf(|prompt, _| prompt.contains("Blood test: elevated CRP"))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(REPLY.to_string()) }));
        let service = Service::new(llm);

        let record = service
            .analyze_follow_up(FollowUpAnalysisInput {
                requester: Some("user-2".to_string()),
                previous_analysis: ensure_complete(Default::default()),
                reported_symptoms: Vec::new(),
                document_text: "Blood test: elevated CRP".to_string(),
                diet_preference: "vegetarian".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(record.possible_conditions[0].name, "Tension Headache");
    }

    #[test]
    fn test_condense_reply() {
        assert_eq!(condense_reply("a\n\n  b\tc"), "a b c");

        let long = "x".repeat(1500) + &"y".repeat(1500);
        let condensed = condense_reply(&long);
        assert!(condensed.starts_with(&"x".repeat(1000)));
        assert!(condensed.ends_with(&"y".repeat(1000)));
        assert!(condensed.contains(" ... [truncated] ... "));
        assert_eq!(condensed.chars().count(), 2000 + " ... [truncated] ... ".len());
    }
}
