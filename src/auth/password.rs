// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Hashes are Argon2id PHC strings with a fresh random salt per call.
/// Verification takes its parameters from the stored string, so hashes
/// produced with different cost settings still verify.
#[derive(Clone, Default)]
pub struct PasswordService {
    hasher: Argon2<'static>,
}

impl PasswordService {
    /// Create a PasswordService with the crate's default Argon2id parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PasswordService with explicit Argon2id cost parameters
    pub fn with_params(params: Params) -> Self {
        Self {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash a password using Argon2id
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }

    /// Verify a password against a stored hash
    ///
    /// Returns `Ok(false)` on mismatch and an error only if the stored
    /// hash cannot be parsed.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| AuthError::PasswordHashError(e.to_string()))?;

        match self.hasher.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswordHashError(e.to_string())),
        }
    }

    /// `hash_password` on tokio's blocking pool
    ///
    /// Argon2 burns CPU and memory for tens of milliseconds; request
    /// handlers call this instead of the synchronous form.
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let service = self.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || service.hash_password(&password))
            .await
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
    }

    /// `verify_password` on tokio's blocking pool
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let service = self.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || service.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
    }
}

#[cfg(test)]
pub(crate) fn fast_password_service() -> PasswordService {
    // Minimum-cost parameters keep debug-build tests quick
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    PasswordService::with_params(params)
}
