//! Shared application state passed to route builders and the ready handler.

use database::postgres::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL pool, absent when running on the in-memory store
    pub db: Option<DatabaseConnection>,
}
