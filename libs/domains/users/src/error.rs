use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Internal(format!("Database error: {}", err))
    }
}

impl UserError {
    /// HTTP status for this error. Every rejection the caller can cause maps
    /// to the same 400 so clients cannot tell them apart.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::NotFound(_)
            | UserError::InvalidCredentials
            | UserError::Validation(_)
            | UserError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            UserError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            other => tracing::debug!(reason = %other, "Request rejected"),
        }

        // No body: rejections are deliberately indistinguishable
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_collapse_to_bad_request() {
        let errors = [
            UserError::NotFound(1),
            UserError::InvalidCredentials,
            UserError::Validation("too short".to_string()),
            UserError::InvalidRequest("missing user_id".to_string()),
        ];

        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_internal_error_is_server_error() {
        let response = UserError::Internal("connection reset".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_db_error_converts_to_internal() {
        let err: UserError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, UserError::Internal(ref msg) if msg.contains("boom")));
    }
}
