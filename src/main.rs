//! Folk MCP Server - Main entry point
//!
//! Serves the Folk CRM tools over MCP on stdio.

use anyhow::Result;
use folk_mcp_server::client::{AsyncFolkClient, AsyncFolkClientImpl};
use folk_mcp_server::{Config, FolkClient, FolkMcpServer};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Loads .env too, so LOG_LEVEL from the file reaches the filter below.
    // Nothing is logged before this point; a failure is reported by anyhow on stderr
    let config = Config::from_env()?;

    // Logs go to stderr only; stdout carries MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!(
        "Starting Folk MCP Server with API URL: {} (timeout {}s)",
        config.folk_api_url, config.request_timeout
    );

    let sync_client = FolkClient::new(&config);
    let metrics = sync_client.metrics().clone();
    let client = Arc::new(AsyncFolkClientImpl::new(sync_client)) as Arc<dyn AsyncFolkClient>;

    let server = FolkMcpServer::new(client);

    info!("Starting MCP server with stdio transport");
    let result = folk_mcp_server::server::run_server(server).await;

    metrics.summary().log();

    match result {
        Ok(()) => {
            info!("Folk MCP Server shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("MCP server stopped with an error: {}", e);
            Err(e)
        }
    }
}
