use clap::Parser;
use llm_dns_domain::{CliOverrides, LlmProvider};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "llm-dns")]
#[command(version)]
#[command(about = "LLM-over-DNS: answer TXT queries with an LLM response")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (default: 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (default: 5353; use 53 with sudo)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// LLM provider to use (default: openai)
    #[arg(long, value_parser = parse_provider)]
    provider: Option<LlmProvider>,

    /// Model name (default depends on provider)
    #[arg(long)]
    model: Option<String>,

    /// Max response characters (0 = unlimited, default: 800)
    #[arg(long)]
    max_chars: Option<usize>,

    /// Optional system prompt sent with every question
    #[arg(long = "systemprompt")]
    system_prompt: Option<String>,

    /// Require API key authentication for queries (set DNS_API_KEY)
    #[arg(long)]
    require_api_key: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_provider(value: &str) -> Result<LlmProvider, String> {
    value.parse().map_err(|e: llm_dns_domain::DomainError| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.host,
        dns_port: cli.port,
        provider: cli.provider,
        model: cli.model,
        max_output_chars: cli.max_chars,
        system_prompt: cli.system_prompt,
        require_api_key: cli.require_api_key,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting LLM DNS v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    bootstrap::log_config(&config);

    let services = di::Services::new(&config)?;

    let shutdown = CancellationToken::new();
    tokio::spawn(server::shutdown_signal(shutdown.clone()));

    info!(
        "LLM-over-DNS listening on {} (UDP/TCP), provider={}",
        config.server.listen_address(),
        config.llm.provider
    );

    server::start_dns_server(
        config.server.listen_address(),
        services.handler,
        Duration::from_secs(config.server.tcp_timeout_secs),
        shutdown,
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
