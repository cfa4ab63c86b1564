use async_trait::async_trait;
use llm_dns_domain::{DomainError, LlmProvider};
use std::sync::Arc;

/// One generation call: the question plus the provider selection that was
/// fixed at startup.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: Arc<str>,
    pub provider: LlmProvider,
    /// `None` lets the backend use its default model.
    pub model: Option<Arc<str>>,
    pub system_prompt: Option<Arc<str>>,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce an answer for `request.prompt`. No retries, no streaming.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError>;
}
