use axum::Router;
use axum::routing::get;
use axum_helpers::server::{create_router, health_router};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;
pub mod users;

/// Mount point of the users API below `/api`
pub const USERS_PATH: &str = "/v1/users";

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest(USERS_PATH, users::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Full application: documented API routes plus /health and /ready.
pub fn app(state: &AppState) -> io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state))?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone())))
}
