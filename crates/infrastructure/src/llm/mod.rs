pub mod anthropic;
pub mod openai;
pub mod router;

use async_trait::async_trait;
use llm_dns_domain::config::LlmConfig;
use llm_dns_domain::{DomainError, LlmProvider};
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

pub use anthropic::AnthropicBackend;
pub use openai::OpenAiBackend;
pub use router::ProviderRouter;

/// Shared HTTP client with connection pooling. No request timeout is set,
/// a slow provider only holds up the query that is waiting on it.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(8)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

const MAX_ERROR_BODY_CHARS: usize = 200;

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, DomainError>;

    fn provider(&self) -> LlmProvider;
}

pub enum Backend {
    OpenAi(OpenAiBackend),
    Anthropic(AnthropicBackend),
}

impl Backend {
    pub async fn complete(
        &self,
        prompt: &str,
        model: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, DomainError> {
        match self {
            Self::OpenAi(b) => CompletionBackend::complete(b, prompt, model, system_prompt).await,
            Self::Anthropic(b) => {
                CompletionBackend::complete(b, prompt, model, system_prompt).await
            }
        }
    }

    pub fn provider(&self) -> LlmProvider {
        match self {
            Self::OpenAi(_) => LlmProvider::OpenAi,
            Self::Anthropic(_) => LlmProvider::Anthropic,
        }
    }
}

/// Build the backend for `provider`, or fail if its API key is missing.
pub fn create_backend(provider: LlmProvider, config: &LlmConfig) -> Result<Backend, DomainError> {
    let api_key = config
        .api_key_for(provider)
        .ok_or_else(|| DomainError::ProviderNotConfigured(provider.to_string()))?;

    match provider {
        LlmProvider::OpenAi => Ok(Backend::OpenAi(OpenAiBackend::new(
            config.openai_base_url.clone(),
            api_key.to_string(),
        ))),
        LlmProvider::Anthropic => Ok(Backend::Anthropic(AnthropicBackend::new(
            config.anthropic_base_url.clone(),
            api_key.to_string(),
            config.max_tokens,
        ))),
    }
}

pub(crate) fn shared_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pull a readable message out of a provider error body. Both providers
/// wrap errors as `{"error": {"message": ...}}`.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

/// Send a JSON request and return the body of a 2xx response.
pub(crate) async fn post_json(
    provider: LlmProvider,
    request: reqwest::RequestBuilder,
) -> Result<String, DomainError> {
    let response = request
        .send()
        .await
        .map_err(|e| DomainError::ProviderRequest {
            provider: provider.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DomainError::ProviderRequest {
            provider: provider.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;

    if !status.is_success() {
        return Err(DomainError::ProviderStatus {
            provider: provider.to_string(),
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(body)
}
