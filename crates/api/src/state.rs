use std::sync::Arc;

use portfolio_core::storage::FileStore;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: portfolio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (topic subscribers).
    pub ws_manager: Arc<WsManager>,
    /// Change-notification bus.
    pub event_bus: Arc<portfolio_events::EventBus>,
    /// Media content storage.
    pub file_store: Arc<dyn FileStore>,
}
