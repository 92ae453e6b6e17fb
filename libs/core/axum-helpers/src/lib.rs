//! # Axum Helpers
//!
//! Shared HTTP plumbing for the account service.
//!
//! - **[`server`]**: router assembly with Swagger UI, health checks, graceful shutdown
//! - **[`http`]**: middleware (CORS, security headers) and the 404 fallback

pub mod http;
pub mod server;

pub use http::{cors_layer_from_env, not_found, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};
