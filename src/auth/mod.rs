// Authentication module
// Registration, credential checks, token issuance and the user listing

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{list_users_handler, login_handler, register_handler};
pub use middleware::{require_bearer, AuthenticatedUser};
pub use models::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse};
pub use password::PasswordService;
pub use repository::{PgUserStore, UserStore};
pub use service::AuthService;
pub use token::TokenService;
