// Bearer-token middleware for protected routes

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{auth::error::AuthError, error::ApiError, AppState};

/// Identity carried by a verified access token
///
/// Inserted into request extensions by [`require_bearer`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
}

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)
}

/// Reject requests without a valid access token
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let endpoint = request.uri().path().to_string();

    let claims = bearer_token(request.headers())
        .and_then(|token| state.auth_service.tokens().validate_access_token(token))
        .map_err(|e| {
            warn!("Rejected request to {}: {}", endpoint, e);
            ApiError::from(e)
        })?;

    debug!("Authenticated user_id={} for {}", claims.sub, endpoint);
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_authorization_header() {
        let headers = HeaderMap::new();
        let result = bearer_token(&headers);
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_invalid_bearer_format() {
        for value in ["InvalidFormat token", "token_without_bearer", "Basic dXNlcjpwYXNz", "Bearer "] {
            let headers = headers_with(value);
            assert!(matches!(bearer_token(&headers), Err(AuthError::InvalidToken)));
        }
    }
}
