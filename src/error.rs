// Error handling module for the Auth API
// Boundary error type: what clients see. Detailed kinds live in auth::error.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use crate::auth::AuthError;

/// Client-facing error returned by every handler
///
/// Each variant maps to one HTTP status code. Messages carried by
/// `BadRequest` and `Unauthorized` are sent verbatim; `InternalError`
/// details are logged and replaced with a generic message.
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed validation
    /// Maps to HTTP 400 Bad Request
    ValidationError(validator::ValidationErrors),

    /// Generic client error with a deliberately uninformative message
    /// Maps to HTTP 400 Bad Request
    BadRequest { message: String },

    /// Missing or unusable bearer token
    /// Maps to HTTP 401 Unauthorized
    Unauthorized(String),

    /// Storage, hashing or signing failure
    /// Maps to HTTP 500 Internal Server Error
    InternalError(String),
}

/// Consistent error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "UNAUTHORIZED")
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// Field-level validation errors, omitted when None
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    fn new(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.to_string(),
            message: message.into(),
            details: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    /// Message returned for any failed registration
    pub const EMAIL_EXISTS: &'static str = "Email already exists";

    /// Message returned for any failed login
    pub const INVALID_CREDENTIALS: &'static str = "Invalid credentials";

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);

                let mut response = ErrorResponse::new("VALIDATION_ERROR", "Request validation failed");
                response.details = serde_json::to_value(errors).ok();
                (StatusCode::BAD_REQUEST, response)
            }
            ApiError::BadRequest { message } => {
                debug!("Bad request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("BAD_REQUEST", message.clone()),
                )
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("UNAUTHORIZED", message.clone()),
                )
            }
            ApiError::InternalError(internal_msg) => {
                // Full detail stays in the log
                error!("Internal error: {}", internal_msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal server error occurred"),
                )
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Collapse detailed auth errors into their client-facing kind
impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::DuplicateEmail => ApiError::bad_request(ApiError::EMAIL_EXISTS),
            AuthError::InvalidCredentials => ApiError::bad_request(ApiError::INVALID_CREDENTIALS),
            _ if error.is_internal() => ApiError::InternalError(error.to_string()),
            _ => ApiError::Unauthorized(error.to_string()),
        }
    }
}

/// Bodies that are not valid JSON or do not match the DTO
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}
