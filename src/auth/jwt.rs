//! # JWT Token Management
//!
//! JSON Web Token generation and validation (HS256).
//!
//! Validation is stateless. Tokens carry the user id, username and role;
//! never secrets. A manager built without a secret refuses both to sign and
//! to verify.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::user::{Role, User};

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,

    pub username: String,

    pub role: Role,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,

    /// Audience
    pub aud: String,

    /// Issuer
    pub iss: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing; `None` disables signing and verification
    pub secret: Option<String>,

    /// Access token lifetime
    pub token_ttl: Duration,

    /// Issuer identifier
    pub issuer: String,

    /// Audience identifier
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_ttl: Duration::hours(24),
            issuer: "pressroom".to_string(),
            audience: "pressroom".to_string(),
        }
    }
}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// JWT manager for token generation and validation
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    keys: Option<Keys>,
}

impl JwtManager {
    /// Create a new JWT manager with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let keys = config.secret.as_deref().map(|secret| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        Self { config, keys }
    }

    /// Whether a signing secret is configured
    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    /// Token lifetime
    pub fn token_ttl(&self) -> Duration {
        self.config.token_ttl
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user: &User) -> AuthResult<String> {
        let keys = self.keys.as_ref().ok_or(AuthError::SigningKeyMissing)?;
        let now = Utc::now();
        let exp = now + self.config.token_ttl;

        let claims = JwtClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate an access token and extract claims
    pub fn validate_token(&self, token: &str) -> AuthResult<JwtClaims> {
        let keys = self.keys.as_ref().ok_or(AuthError::SigningKeyMissing)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<JwtClaims>(token, &keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract user ID from validated claims
    pub fn get_user_id(claims: &JwtClaims) -> AuthResult<Uuid> {
        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}
