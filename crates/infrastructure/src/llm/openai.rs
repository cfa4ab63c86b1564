//! OpenAI backend over the Responses API.
//!
//! ```text
//! POST /v1/responses
//! Authorization: Bearer <OPENAI_API_KEY>
//!
//! {"model": "...", "instructions": "...", "input": "<question>"}
//! ```

use super::{endpoint, post_json, shared_client, CompletionBackend};
use async_trait::async_trait;
use llm_dns_domain::{DomainError, LlmProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Used when no system prompt is configured.
pub const DEFAULT_INSTRUCTIONS: &str = "Give me back text only, no markdown or other formatting";

#[derive(Debug, Serialize)]
pub(crate) struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct OpenAiBackend {
    base_url: String,
    api_key: String,
}

impl OpenAiBackend {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self { base_url, api_key }
    }

    pub(crate) fn request_body<'a>(
        prompt: &'a str,
        model: &'a str,
        system_prompt: Option<&'a str>,
    ) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model,
            instructions: system_prompt.unwrap_or(DEFAULT_INSTRUCTIONS),
            input: prompt,
        }
    }

    /// Concatenate every `output_text` part, the same text the SDKs expose
    /// as `output_text`.
    pub(crate) fn extract_text(body: &str) -> Result<String, DomainError> {
        let parsed: ResponsesBody =
            serde_json::from_str(body).map_err(|e| DomainError::InvalidProviderResponse {
                provider: LlmProvider::OpenAi.to_string(),
                message: e.to_string(),
            })?;

        let mut found = false;
        let mut text = String::new();
        for part in parsed.output.iter().flat_map(|item| item.content.iter()) {
            if part.kind == "output_text" {
                found = true;
                text.push_str(part.text.as_deref().unwrap_or_default());
            }
        }

        if !found {
            return Err(DomainError::InvalidProviderResponse {
                provider: LlmProvider::OpenAi.to_string(),
                message: "response contained no output_text".to_string(),
            });
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, DomainError> {
        let url = endpoint(&self.base_url, "/v1/responses");
        debug!(url = %url, model, prompt_len = prompt.len(), "Sending OpenAI request");

        let request = shared_client()
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&Self::request_body(prompt, model, system_prompt));

        let body = post_json(LlmProvider::OpenAi, request).await?;
        Self::extract_text(&body)
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_uses_default_instructions() {
        let body = OpenAiBackend::request_body("what is dns", "gpt-4.1-mini", None);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "model": "gpt-4.1-mini",
                "instructions": DEFAULT_INSTRUCTIONS,
                "input": "what is dns",
            })
        );
    }

    #[test]
    fn test_request_body_with_system_prompt() {
        let body = OpenAiBackend::request_body("q", "m", Some("Answer like a pirate"));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["instructions"], "Answer like a pirate");
    }

    #[test]
    fn test_extract_text_joins_output_parts() {
        let body = json!({
            "id": "resp_1",
            "output": [
                {"type": "reasoning", "summary": []},
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        {"type": "output_text", "text": "  The Domain Name System", "annotations": []},
                        {"type": "output_text", "text": " maps names to addresses. \n"}
                    ]
                }
            ]
        })
        .to_string();

        assert_eq!(
            OpenAiBackend::extract_text(&body).unwrap(),
            "The Domain Name System maps names to addresses."
        );
    }

    #[test]
    fn test_extract_text_without_output_is_invalid() {
        let body = json!({"id": "resp_1", "output": []}).to_string();
        assert!(matches!(
            OpenAiBackend::extract_text(&body),
            Err(DomainError::InvalidProviderResponse { .. })
        ));
    }

    #[test]
    fn test_extract_text_rejects_garbage() {
        assert!(OpenAiBackend::extract_text("<html>").is_err());
    }

    #[test]
    fn test_backend_reports_provider() {
        let backend = OpenAiBackend::new("https://api.openai.com".to_string(), "k".to_string());
        assert_eq!(backend.provider(), LlmProvider::OpenAi);
    }
}
