use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable. There is no in-process mutable state: every request
/// goes straight to the database.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ingest_db::DbPool,
    /// Server configuration, including the credentials checked by the auth extractors.
    pub config: Arc<ServerConfig>,
}
