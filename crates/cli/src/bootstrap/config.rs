use anyhow::Context;
use llm_dns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, overrides).context("Failed to load configuration")
}

pub fn log_config(config: &Config) {
    info!(
        listen = %config.server.listen_address(),
        provider = %config.llm.provider,
        model = config.llm.effective_model(),
        max_output_chars = config.llm.max_output_chars,
        max_chunk_bytes = config.txt.max_chunk_bytes,
        require_api_key = config.auth.require_api_key,
        config_file = ?Config::get_config_path(),
        "Configuration loaded"
    );
}
