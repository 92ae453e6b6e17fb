use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{ChangePasswordQuery, LoginQuery, User, UserIdQuery};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(get_user, login, change_password),
    components(schemas(User)),
    tags((name = TAG, description = "User lookup, login and password changes"))
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_user))
        .route("/login", post(login))
        .route("/passwd", post(change_password))
        .with_state(shared_service)
}

/// Unwrap query params, turning a malformed query string into the same
/// empty 400 every other rejection produces.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> UserResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|e| UserError::InvalidRequest(e.body_text()))
}

/// Get a user by ID
///
/// GET /users?user_id=1
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(UserIdQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Unknown user or malformed query")
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> UserResult<Json<User>> {
    let UserIdQuery { user_id } = query_params(query)?;
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}

/// Check a name/password pair
///
/// POST /users/login?name=alice&passwd=secret
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    params(LoginQuery),
    responses(
        (status = 200, description = "Credentials match"),
        (status = 400, description = "Credentials rejected")
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> UserResult<StatusCode> {
    let LoginQuery { name, passwd } = query_params(query)?;
    service.login(&name, &passwd).await?;
    Ok(StatusCode::OK)
}

/// Change a user's password
///
/// POST /users/passwd?user_id=1&passwd=newSecret1
#[utoipa::path(
    post,
    path = "/passwd",
    tag = TAG,
    params(ChangePasswordQuery),
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Unknown user or password length outside 8..=16")
    )
)]
async fn change_password<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    query: Result<Query<ChangePasswordQuery>, QueryRejection>,
) -> UserResult<StatusCode> {
    let ChangePasswordQuery { user_id, passwd } = query_params(query)?;
    service.change_password(user_id, &passwd).await?;
    Ok(StatusCode::OK)
}
