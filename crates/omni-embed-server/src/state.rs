//! Shared application state for the Omni embed demo server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It is read-only for the process lifetime;
//! requests never mutate it.

use std::sync::Arc;

use omni_embed_core::EmbedSigner;

use crate::config::ServerConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The injected signed-URL generator.
    pub signer: Arc<dyn EmbedSigner>,
    /// Configuration snapshot, used by the diagnostics route.
    pub config: ServerConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
