use serde::{Deserialize, Serialize};

/// Access-token enforcement. The secret itself is never part of the file,
/// it is read from `DNS_API_KEY` at load time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub require_api_key: bool,

    #[serde(skip)]
    pub api_key: Option<String>,
}
