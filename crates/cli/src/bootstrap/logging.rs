use llm_dns_domain::Config;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.logging.level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn default_directives(level: &str) -> String {
    format!(
        "{level},hickory_server=warn,hickory_proto=warn,reqwest=warn,hyper=warn",
        level = level
    )
}
