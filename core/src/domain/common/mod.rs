use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

#[derive(Clone, Debug, Default)]
pub struct HealthVitalsConfig {
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

/// Identifier used to correlate a raw generator reply with the log lines
/// produced while handling it, e.g. `analyze_1718000000`.
pub fn generate_response_id(kind: &str) -> String {
    let (now, _) = generate_timestamp();
    format!("{}_{}", kind, now.timestamp())
}
