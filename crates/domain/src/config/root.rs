use serde::{Deserialize, Serialize};

use super::auth::AuthConfig;
use super::errors::ConfigError;
use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::txt::{TxtConfig, MAX_CHARACTER_STRING_BYTES};
use crate::LlmProvider;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DNS_API_KEY_ENV: &str = "DNS_API_KEY";

/// Main configuration structure for LLM DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Text-generation backend selection and answer limits
    #[serde(default)]
    pub llm: LlmConfig,

    /// TXT record shaping
    #[serde(default)]
    pub txt: TxtConfig,

    /// Access-token enforcement
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. llm-dns.toml in current directory
    /// 3. /etc/llm-dns/config.toml
    /// 4. Default configuration
    ///
    /// Secrets are then read from the process environment and CLI overrides
    /// applied last.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_environment(|name| std::env::var(name).ok());
        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Fill in secrets from an environment lookup. Empty values count as unset.
    pub fn apply_environment<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        self.llm.openai_api_key = read(OPENAI_API_KEY_ENV);
        self.llm.anthropic_api_key = read(ANTHROPIC_API_KEY_ENV);
        self.auth.api_key = read(DNS_API_KEY_ENV);
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(provider) = overrides.provider {
            self.llm.provider = provider;
        }
        if let Some(model) = overrides.model {
            self.llm.model = Some(model);
        }
        if let Some(max_chars) = overrides.max_output_chars {
            self.llm.max_output_chars = max_chars;
        }
        if let Some(prompt) = overrides.system_prompt {
            self.llm.system_prompt = Some(prompt);
        }
        if overrides.require_api_key {
            self.auth.require_api_key = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.txt.max_chunk_bytes == 0 || self.txt.max_chunk_bytes > MAX_CHARACTER_STRING_BYTES
        {
            return Err(ConfigError::Validation(format!(
                "txt.max_chunk_bytes must be between 1 and {}, got {}",
                MAX_CHARACTER_STRING_BYTES, self.txt.max_chunk_bytes
            )));
        }

        if self.llm.api_key_for(self.llm.provider).is_none() {
            return Err(ConfigError::Validation(format!(
                "Provider '{}' selected but {} is not set",
                self.llm.provider,
                api_key_env_for(self.llm.provider)
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("llm-dns.toml").exists() {
            Some("llm-dns.toml".to_string())
        } else if std::path::Path::new("/etc/llm-dns/config.toml").exists() {
            Some("/etc/llm-dns/config.toml".to_string())
        } else {
            None
        }
    }
}

pub fn api_key_env_for(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAi => OPENAI_API_KEY_ENV,
        LlmProvider::Anthropic => ANTHROPIC_API_KEY_ENV,
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub provider: Option<LlmProvider>,
    pub model: Option<String>,
    pub max_output_chars: Option<usize>,
    pub system_prompt: Option<String>,
    pub require_api_key: bool,
    pub log_level: Option<String>,
}
