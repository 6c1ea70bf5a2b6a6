//! Omni embed demo server entry point.
//!
//! Loads configuration from the environment, builds the signer and app
//! state, then starts the Axum HTTP server with graceful shutdown. Missing
//! embed credentials do not prevent startup — they surface per-request as
//! configuration errors and via `GET /api/test-env`.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use omni_embed_core::OmniSigner;
use omni_embed_server::build_router;
use omni_embed_server::config::ServerConfig;
use omni_embed_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    if config.secret.is_none() {
        warn!("OMNI_SECRET is not set — embed requests will fail until it is");
    }
    if config.organization_name.is_none() && config.host.is_none() {
        warn!("neither OMNI_ORGANIZATION_NAME nor OMNI_HOST is set — check GET /api/test-env");
    }

    let signer = Arc::new(OmniSigner::new(
        config.secret.clone(),
        config.organization_name.clone(),
        config.host.clone(),
    ));

    let state = Arc::new(AppState {
        signer,
        config: config.clone(),
    });

    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "omni-embed server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("omni-embed server stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
