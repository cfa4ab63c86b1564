use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown provider: {0}. Supported providers: openai, anthropic")]
    UnknownProvider(String),

    #[error("Provider {0} is not configured (missing API key)")]
    ProviderNotConfigured(String),

    #[error("{provider} request failed: {message}")]
    ProviderRequest { provider: String, message: String },

    #[error("{provider} returned HTTP {status}: {message}")]
    ProviderStatus {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider} returned an invalid response: {message}")]
    InvalidProviderResponse { provider: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
