//! Server configuration for the Omni embed demo.
//!
//! Loads configuration from environment variables. Embed credentials are
//! captured as raw `Option`s and validated lazily on first signer use —
//! a misconfigured server still starts and serves diagnostics.

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Omni embed secret (expected to be exactly 32 characters).
    pub secret: Option<String>,
    /// Organization name for `{org}.embed-omniapp.co` destinations.
    pub organization_name: Option<String>,
    /// Custom embed host (mutually exclusive with the organization name).
    pub host: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `OMNI_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `OMNI_LOG_LEVEL` — log filter (default: `info`)
    /// - `OMNI_SECRET` — 32-character embed secret from Admin > Embed
    /// - `OMNI_ORGANIZATION_NAME` — organization subdomain (exactly one of
    ///   this or `OMNI_HOST` must be set)
    /// - `OMNI_HOST` — custom embed domain
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = if let Ok(addr) = std::env::var("OMNI_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(3000);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 3000))
        };

        let log_level = std::env::var("OMNI_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        Self {
            bind_addr,
            log_level,
            secret: std::env::var("OMNI_SECRET").ok(),
            organization_name: std::env::var("OMNI_ORGANIZATION_NAME").ok(),
            host: std::env::var("OMNI_HOST").ok(),
        }
    }
}
