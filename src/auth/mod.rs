//! # Pressroom Auth Module
//!
//! Password policy and hashing, JWT issue/verify, and the user model and
//! repository (including the username/email uniqueness check).

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod user;

pub use crypto::{hash_password_blocking, validate_password, PasswordPolicy};
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager};
pub use user::{normalize_email, Role, User, UserRepository};
