use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User lookup, login and password changes"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = crate::api::USERS_PATH, api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
