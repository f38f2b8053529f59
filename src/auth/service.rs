// Authentication service - credential handling and token issuance

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::{
    error::AuthError,
    models::{User, UserResponse},
    password::PasswordService,
    repository::UserStore,
    token::TokenService,
};

/// Authentication service coordinating the user store, password hashing
/// and token issuance
pub struct AuthService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(users: Arc<dyn UserStore>, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Token service used to sign and verify access tokens
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Register a new user
    ///
    /// The store's uniqueness constraint decides duplicates; there is no
    /// existence pre-check.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let password_hash = self.passwords.hash(password).await?;

        match self.users.create(email, &password_hash).await {
            Ok(user) => {
                info!("Registered user id={}", user.id);
                Ok(user)
            }
            Err(AuthError::DuplicateEmail) => {
                warn!("Registration rejected: email already exists");
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e),
        }
    }

    /// Check an email/password pair
    ///
    /// Returns `Ok(None)` for an unknown email or a wrong password; errors
    /// are reserved for storage and hashing faults.
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!("Credential check failed: no such user");
            return Ok(None);
        };

        if self.passwords.verify(password, &user.password_hash).await? {
            Ok(Some(user))
        } else {
            debug!("Credential check failed: password mismatch for user id={}", user.id);
            Ok(None)
        }
    }

    /// Login a user, returning a signed access token on success
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<String>, AuthError> {
        let Some(user) = self.validate_credentials(email, password).await? else {
            return Ok(None);
        };

        let token = self.tokens.generate_access_token(user.id, &user.email)?;
        info!("Issued access token for user id={}", user.id);
        Ok(Some(token))
    }

    /// List every user as its public projection, in store order
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AuthError> {
        let users = self.users.list().await?;
        debug!("Listing {} users", users.len());
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
