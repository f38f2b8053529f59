// Authentication error types
// These are the detailed, internal kinds; handlers collapse them into
// crate::error::ApiError before anything reaches the client.

use thiserror::Error;

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    /// A user with this email already exists (reported by the store's
    /// uniqueness constraint, not a pre-check)
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
}

impl AuthError {
    /// Whether this error is a server-side fault rather than a client mistake
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::DatabaseError(_)
                | AuthError::PasswordHashError(_)
                | AuthError::TokenGenerationError(_)
        )
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AuthError::DuplicateEmail;
            }
        }
        AuthError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_kinds() {
        assert!(AuthError::DatabaseError("boom".into()).is_internal());
        assert!(AuthError::PasswordHashError("boom".into()).is_internal());
        assert!(AuthError::TokenGenerationError("boom".into()).is_internal());
        assert!(!AuthError::DuplicateEmail.is_internal());
        assert!(!AuthError::InvalidCredentials.is_internal());
        assert!(!AuthError::ExpiredToken.is_internal());
    }

    #[test]
    fn test_non_constraint_sqlx_error_is_database_error() {
        let err = AuthError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::DatabaseError(_)));
    }
}
