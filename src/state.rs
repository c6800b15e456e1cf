//! # state
//!
//! Shared application state injected into every Axum handler.
//!
//! Nothing here is mutable: the service owns no data, it only holds the
//! configuration and one connection-pooled upstream client.

use std::sync::Arc;

use crate::config::Config;
use crate::hyperliquid::InfoClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Shared across all requests (thread-safe, connection pooling).
    pub info: InfoClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let info = InfoClient::new(
            reqwest::Client::new(),
            config.info_url.clone(),
            config.upstream_timeout,
        );
        Self {
            config: Arc::new(config),
            info,
        }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: Config) -> SharedState {
    Arc::new(AppState::new(config))
}
