use std::sync::Arc;

use crate::config::ServerConfig;
use crate::weather::WeatherProvider;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tasklane_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Source of the weather snapshot stored on new todos.
    pub weather: Arc<dyn WeatherProvider>,
}
