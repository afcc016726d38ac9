//! MCP server for the Folk CRM.
//!
//! This module provides the MCP protocol server that exposes Folk
//! functionality to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::FolkMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the Folk MCP server over stdio until the client disconnects.
///
/// stdout carries JSON-RPC only; logs go to stderr.
pub async fn run_server(server: FolkMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
