// HTTP handlers for authentication endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::debug;
use validator::Validate;

use crate::{
    auth::{
        error::AuthError,
        middleware::AuthenticatedUser,
        models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    },
    error::ApiError,
    AppState,
};

/// Register a new user
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Email already exists or malformed body", body = crate::error::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let user = state
        .auth_service
        .register(&request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login a user
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials or malformed body", body = crate::error::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    // Unknown email and wrong password produce the same response
    let access_token = state
        .auth_service
        .login(&request.email, &request.password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    Ok((StatusCode::CREATED, Json(LoginResponse { access_token })))
}

/// List all registered users
/// GET /auth/users
#[utoipa::path(
    get,
    path = "/auth/users",
    responses(
        (status = 200, description = "List all registered users", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn list_users_handler(
    State(state): State<AppState>,
    caller: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    match caller {
        Some(Extension(caller)) => debug!("User list requested by user_id={}", caller.user_id),
        None => debug!("User list requested anonymously"),
    }

    let users = state.auth_service.list_users().await?;
    Ok(Json(users))
}
