use axum::Router;
use domain_users::{InMemoryUserRepository, PgUserRepository, UserService, handlers};
use tracing::info;

use crate::state::AppState;

/// Users router backed by PostgreSQL when connected, otherwise by an
/// in-process store that lives as long as the router.
pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => {
            info!("Users backed by PostgreSQL");
            handlers::router(UserService::new(PgUserRepository::new(db.clone())))
        }
        None => {
            info!("Users backed by the in-memory store");
            handlers::router(UserService::new(InMemoryUserRepository::new()))
        }
    }
}
