//! HTTP middleware and fallbacks shared by every router.

pub mod cors;
pub mod security;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub use cors::{CORS_ALLOWED_ORIGIN, cors_layer_from_env, create_cors_layer, parse_allowed_origins};
pub use security::security_headers;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: &'static str,
}

/// Fallback for routes that do not exist.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse {
        error: "NotFound",
        message: "The requested resource was not found",
    });

    (StatusCode::NOT_FOUND, body).into_response()
}
