//! mcp-precache server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use precache_client::{FetchClient, FetchConfig, Worker};
use precache_core::{AppConfig, CacheDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let origin = config.origin_url()?;

    let db = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening store database {}", config.db_path.display()))?;
    let network = FetchClient::new(FetchConfig::from(&config))?;
    let worker = Worker::new(db, Arc::new(network), origin).reject_non_ok(config.reject_non_ok);

    if config.install_on_start
        && let Err(e) = worker.install_if_needed().await
    {
        tracing::error!(error = %e, "install failed; serving from network until sw_install succeeds");
    }

    tracing::info!(origin = %worker.origin(), "Starting mcp-precache server on stdio transport");

    let handler = handler::PrecacheServer::new(worker);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
