//! HTTP front end for the menuchat retrieval engine.

pub mod cli;
pub mod config;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use menuchat_retrieval::RetrievalEngine;
use tokio::net::TcpListener;
use tracing::{error, info};

pub use cli::Cli;
pub use config::ServerConfig;

/// Build the engine and serve HTTP until Ctrl-C.
///
/// A missing corpus or embedding provider does not stop the server; it
/// starts anyway and answers every chat as not ready.
pub async fn run(config: ServerConfig) -> Result<()> {
    let engine = Arc::new(RetrievalEngine::from_config(&config.retrieval).await);
    if engine.is_ready() {
        info!("Serving {} corpus entries", engine.index().len());
    } else {
        info!("Starting without a ready index; chats will be answered as not ready");
    }

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, routes::router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
