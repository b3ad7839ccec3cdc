use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("LLM quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
