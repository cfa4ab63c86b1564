use crate::LlmProvider;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Overrides the provider's default model when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Answer length cap in characters, 0 disables truncation.
    #[serde(default = "default_max_output_chars")]
    pub max_output_chars: usize,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,

    #[serde(skip)]
    pub openai_api_key: Option<String>,

    #[serde(skip)]
    pub anthropic_api_key: Option<String>,
}

impl LlmConfig {
    /// Model that will actually be requested from the selected provider.
    pub fn effective_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn api_key_for(&self, provider: LlmProvider) -> Option<&str> {
        match provider {
            LlmProvider::OpenAi => self.openai_api_key.as_deref(),
            LlmProvider::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: None,
            system_prompt: None,
            max_output_chars: default_max_output_chars(),
            max_tokens: default_max_tokens(),
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
            openai_api_key: None,
            anthropic_api_key: None,
        }
    }
}

// 800 characters fit in four 200-byte character-strings.
fn default_max_output_chars() -> usize {
    800
}

fn default_max_tokens() -> u32 {
    5000
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_anthropic_base_url() -> String {
    DEFAULT_ANTHROPIC_BASE_URL.to_string()
}
