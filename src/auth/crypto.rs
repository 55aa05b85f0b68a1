//! # Password Handling
//!
//! Password policy checks and Argon2id hashing.
//!
//! Passwords are only ever stored as Argon2id hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::errors::{AuthError, AuthResult};

/// Password requirements configuration
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_number: bool,
    pub require_special: bool,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_number: true,
            require_special: true,
            require_uppercase: true,
            require_lowercase: true,
        }
    }
}

impl PasswordPolicy {
    /// Validate a password against this policy
    pub fn validate(&self, password: &str) -> AuthResult<()> {
        validate_password(password, self)
    }
}

/// Validate password against policy
///
/// Checks run in a fixed order (length, number, special, uppercase,
/// lowercase) and the first failure is reported.
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> AuthResult<()> {
    if password.chars().count() < policy.min_length {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            policy.min_length
        )));
    }

    if policy.require_number && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one number".to_string(),
        ));
    }

    if policy.require_special
        && !password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one special character".to_string(),
        ));
    }

    if policy.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if policy.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    Ok(())
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Hash a password on the blocking pool so Argon2 does not stall the runtime
pub async fn hash_password_blocking(password: String) -> AuthResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AuthError::HashingFailed)?
}

/// Verify a password against its hash
///
/// Uses constant-time comparison internally (via argon2 crate).
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(password: &str) -> String {
        match validate_password(password, &PasswordPolicy::default()) {
            Err(AuthError::WeakPassword(msg)) => msg,
            other => panic!("expected weak password, got {:?}", other),
        }
    }

    #[test]
    fn test_password_hash_and_verify() {
        let password = "Secure_password_123";
        let hash = hash_password(password).unwrap();

        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_password_hash_produces_unique_hashes() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Salted
        assert_ne!(hash1, hash2);
    }

    #[tokio::test]
    async fn test_blocking_hash_verifies() {
        let hash = hash_password_blocking("Secure_password_123".to_string())
            .await
            .unwrap();
        assert!(verify_password("Secure_password_123", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(rejection("Ab1!").contains("at least 8 characters"));
    }

    #[test]
    fn test_each_missing_class_is_named() {
        assert!(rejection("Abcdefgh!").contains("number"));
        assert!(rejection("Abcdefgh1").contains("special character"));
        assert!(rejection("abcdefg1!").contains("uppercase"));
        assert!(rejection("ABCDEFG1!").contains("lowercase"));
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validate_password("Abcdefg1!", &PasswordPolicy::default()).is_ok());
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = PasswordPolicy {
            min_length: 4,
            require_number: false,
            require_special: false,
            require_uppercase: false,
            require_lowercase: false,
        };
        assert!(policy.validate("abcd").is_ok());
        assert!(policy.validate("abc").is_err());
    }
}
