pub mod auth;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod root;
pub mod server;
pub mod txt;

pub use auth::AuthConfig;
pub use errors::ConfigError;
pub use llm::LlmConfig;
pub use logging::LoggingConfig;
pub use root::{api_key_env_for, CliOverrides, Config};
pub use server::ServerConfig;
pub use txt::TxtConfig;
