use super::{create_backend, Backend};
use async_trait::async_trait;
use llm_dns_application::ports::{GenerationRequest, TextGenerator};
use llm_dns_domain::config::LlmConfig;
use llm_dns_domain::{DomainError, LlmProvider};
use std::time::Instant;
use tracing::{debug, error, info};

/// Dispatches generation requests to the backend named by the request.
pub struct ProviderRouter {
    backends: Vec<Backend>,
}

impl ProviderRouter {
    pub fn new(backends: Vec<Backend>) -> Self {
        Self { backends }
    }

    /// Build a backend for every provider that has an API key configured.
    pub fn from_config(config: &LlmConfig) -> Self {
        let backends: Vec<Backend> = LlmProvider::ALL
            .into_iter()
            .filter_map(|provider| create_backend(provider, config).ok())
            .collect();

        info!(
            providers = ?backends.iter().map(Backend::provider).collect::<Vec<_>>(),
            "LLM providers configured"
        );

        Self::new(backends)
    }

    pub fn supports(&self, provider: LlmProvider) -> bool {
        self.backend(provider).is_some()
    }

    fn backend(&self, provider: LlmProvider) -> Option<&Backend> {
        self.backends.iter().find(|b| b.provider() == provider)
    }
}

#[async_trait]
impl TextGenerator for ProviderRouter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        let backend = self
            .backend(request.provider)
            .ok_or_else(|| DomainError::ProviderNotConfigured(request.provider.to_string()))?;

        let model = request
            .model
            .as_deref()
            .unwrap_or_else(|| request.provider.default_model());

        let start = Instant::now();
        match backend
            .complete(&request.prompt, model, request.system_prompt.as_deref())
            .await
        {
            Ok(answer) => {
                debug!(
                    provider = %request.provider,
                    model,
                    answer_len = answer.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Generation completed"
                );
                Ok(answer)
            }
            Err(e) => {
                error!(provider = %request.provider, model, error = %e, "Generation failed");
                Err(e)
            }
        }
    }
}
