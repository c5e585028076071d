//! Desmos MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and serves the formula tools over
//! the configured transport.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use desmos_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment (and .env)
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    if config.desmos.has_api_key() {
        info!("Remote plotting via {}", config.desmos.api_url);
    } else {
        info!("Remote plotting disabled, using local rendering only");
    }

    let server = McpServer::new(config.clone())?;

    info!("Server initialized");

    TransportService::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr because
/// stdout carries the STDIO transport.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();
}
