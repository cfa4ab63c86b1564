//! Anthropic backend over the Messages API.

use super::{endpoint, post_json, shared_client, CompletionBackend};
use async_trait::async_trait;
use llm_dns_domain::{DomainError, LlmProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesBody {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicBackend {
    base_url: String,
    api_key: String,
    max_tokens: u32,
}

impl AnthropicBackend {
    pub fn new(base_url: String, api_key: String, max_tokens: u32) -> Self {
        Self {
            base_url,
            api_key,
            max_tokens,
        }
    }

    pub(crate) fn request_body<'a>(
        &self,
        prompt: &'a str,
        model: &'a str,
        system_prompt: Option<&'a str>,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model,
            max_tokens: self.max_tokens,
            system: system_prompt,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        }
    }

    /// The answer is the first text block of the message.
    pub(crate) fn extract_text(body: &str) -> Result<String, DomainError> {
        let parsed: MessagesBody =
            serde_json::from_str(body).map_err(|e| DomainError::InvalidProviderResponse {
                provider: LlmProvider::Anthropic.to_string(),
                message: e.to_string(),
            })?;

        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| DomainError::InvalidProviderResponse {
                provider: LlmProvider::Anthropic.to_string(),
                message: "response contained no text block".to_string(),
            })
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, DomainError> {
        let url = endpoint(&self.base_url, "/v1/messages");
        debug!(url = %url, model, prompt_len = prompt.len(), "Sending Anthropic request");

        let request = shared_client()
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(prompt, model, system_prompt));

        let body = post_json(LlmProvider::Anthropic, request).await?;
        Self::extract_text(&body)
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::Anthropic
    }
}
