use crate::{
    domain::common::{
        HealthVitalsConfig, entities::app_errors::CoreError, services::Service,
    },
    infrastructure::llm::GeminiLLMClient,
};

pub type HealthVitalsService = Service<GeminiLLMClient>;

pub async fn create_service(config: HealthVitalsConfig) -> Result<HealthVitalsService, CoreError> {
    let api_key = config
        .llm
        .gemini_api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            tracing::error!("Cannot create service: GOOGLE_API_KEY not configured");
            CoreError::MissingConfiguration("API key not configured".to_string())
        })?;

    let llm_client = GeminiLLMClient::new(api_key, config.llm.gemini_model);

    Ok(Service::new(llm_client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::LLMConfig;

    #[tokio::test]
    async fn test_missing_api_key_is_rejected() {
        let result = create_service(HealthVitalsConfig::default()).await;
        assert!(matches!(result, Err(CoreError::MissingConfiguration(_))));

        let blank = HealthVitalsConfig {
            llm: LLMConfig {
                gemini_api_key: Some("  ".to_string()),
                ..Default::default()
            },
        };
        assert!(create_service(blank).await.is_err());
    }

    #[tokio::test]
    async fn test_service_is_created_with_key() {
        let config = HealthVitalsConfig {
            llm: LLMConfig {
                gemini_api_key: Some("test-key".to_string()),
                ..Default::default()
            },
        };
        assert!(create_service(config).await.is_ok());
    }
}
