//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================
    /// Unknown user or wrong password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already registered
    #[error("Username is already taken")]
    UsernameTaken,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Password does not meet requirements
    #[error("{0}")]
    WeakPassword(String),

    /// Account has been banned by a moderator
    #[error("Account suspended")]
    AccountSuspended,

    // ==================
    // Token Errors
    // ==================
    /// No token was presented
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Token is malformed, tampered with, or names an unknown user
    #[error("Invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("Token expired")]
    TokenExpired,

    /// Caller lacks the required role or ownership
    #[error("Not authorized to perform this action")]
    Forbidden,

    // ==================
    // Internal Errors
    // ==================
    /// No signing secret is configured
    #[error("JWT signing secret is not configured")]
    SigningKeyMissing,

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::WeakPassword(_) => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::AuthenticationRequired => 401,

            // 403 Forbidden
            AuthError::InvalidToken => 403,
            AuthError::TokenExpired => 403,
            AuthError::Forbidden => 403,
            AuthError::AccountSuspended => 403,

            // 409 Conflict
            AuthError::UsernameTaken => 409,
            AuthError::EmailTaken => 409,

            // 500 Internal Server Error
            AuthError::SigningKeyMissing => 500,
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::Storage(_) => 500,
        }
    }

    /// Returns whether the caller caused this error
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::InvalidToken.status_code(), 403);
        assert_eq!(AuthError::UsernameTaken.status_code(), 409);
        assert_eq!(AuthError::SigningKeyMissing.status_code(), 500);
        assert_eq!(AuthError::Storage(StoreError::LockPoisoned).status_code(), 500);
    }

    #[test]
    fn test_client_classification() {
        assert!(AuthError::WeakPassword("short".into()).is_client_error());
        assert!(AuthError::TokenExpired.is_client_error());
        assert!(!AuthError::HashingFailed.is_client_error());
    }

    #[test]
    fn test_error_messages_do_not_leak_info() {
        let err = AuthError::InvalidCredentials;
        assert!(!err.to_string().contains("password"));
        assert!(!err.to_string().contains("username"));
    }
}
