use std::sync::Arc;

use watchlist_db::RecordStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The record store port; the concrete adapter is chosen at startup.
    pub store: Arc<dyn RecordStore>,
    /// Server configuration (validation switches are read per request).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Arc<ServerConfig>) -> Self {
        Self { store, config }
    }
}
