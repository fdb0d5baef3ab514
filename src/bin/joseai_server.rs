//! JoseAI proxy server binary.
//!
//! Reads configuration from `JOSEAI_CONFIG` (optional TOML) and the
//! environment (`PORT`, `HOST`, `GROQ_API_KEY`, `GROQ_API_URL`), then serves
//! until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use joseai::{AppConfig, GroqChatProvider, ProxyServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");
    if !config.llm.has_api_key() {
        tracing::warn!("GROQ_API_KEY is not set; chat requests will report a credential error");
    }

    let provider = GroqChatProvider::new(config.llm.clone())
        .context("failed to create chat provider")?;
    let server = ProxyServer::start(&config, Arc::new(provider))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "joseai-server failed to start");
            anyhow::anyhow!("joseai-server failed: {e}")
        })?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    server.shutdown();
    tracing::info!("joseai-server shut down cleanly");
    Ok(())
}
