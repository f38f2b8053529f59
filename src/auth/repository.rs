// User store: persistence port and its PostgreSQL adapter

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{error::AuthError, models::User};

/// Persistence port for user records
///
/// Implementations must enforce email uniqueness atomically inside
/// `create`: two concurrent calls with the same email must not both
/// succeed, and the loser reports `AuthError::DuplicateEmail`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, assigning its identifier
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AuthError>;

    /// Fetch a user by exact (case-sensitive) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// All users in insertion order
    async fn list(&self) -> Result<Vec<User>, AuthError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new PgUserStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AuthError> {
        // The UNIQUE constraint on users.email is the arbiter; a violation
        // converts to AuthError::DuplicateEmail.
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id, email, password",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as::<_, User>("SELECT id, email, password FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}

#[cfg(test)]
pub(crate) use memory::InMemoryUserStore;
