pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    list_users_handler, login_handler, register_handler, require_bearer, AuthService,
    LoginRequest, LoginResponse, RegisterRequest, UserResponse,
};
use error::ErrorResponse;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::list_users_handler,
    ),
    components(
        schemas(RegisterRequest, LoginRequest, LoginResponse, UserResponse, ErrorResponse)
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and user listing")
    ),
    info(
        title = "Auth API",
        version = "1.0.0",
        description = "Email/password registration and JWT login"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

/// Creates and configures the application router
///
/// When `users_list_requires_auth` is set, `GET /auth/users` only answers
/// requests carrying a valid bearer token.
pub fn create_router(state: AppState, users_list_requires_auth: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut users = Router::new().route("/auth/users", get(list_users_handler));
    if users_list_requires_auth {
        users = users.route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));
    }

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .merge(users)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests;
