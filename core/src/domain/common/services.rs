use crate::domain::analysis::ports::LLMClient;

/// Container the domain services are implemented on.
///
/// Every collaborator is injected at construction; nothing is held in
/// process-wide state, so one `Service` can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: LLM,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM) -> Self {
        Self { llm_client }
    }
}
