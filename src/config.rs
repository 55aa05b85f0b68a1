//! Application configuration
//!
//! Loaded once from a JSON file, with the signing secret optionally taken
//! from `PRESSROOM_JWT_SECRET`, then passed explicitly to everything that
//! needs it. Nothing else reads the environment.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::JwtConfig;
use crate::http_server::HttpServerConfig;

/// Environment variable that overrides `auth.jwt_secret`
pub const JWT_SECRET_ENV: &str = "PRESSROOM_JWT_SECRET";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Token and cookie settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HS256 signing secret; required in production
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Token lifetime in minutes (default: 1440)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_issuer")]
    pub audience: String,

    /// Name of the cookie carrying the token (default: "token")
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

fn default_token_ttl() -> i64 {
    24 * 60
}

fn default_issuer() -> String {
    "pressroom".to_string()
}

fn default_cookie_name() -> String {
    "token".to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_minutes: default_token_ttl(),
            issuer: default_issuer(),
            audience: default_issuer(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl AuthSettings {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            // Clamped so an unvalidated value cannot overflow the expiry
            token_ttl: chrono::Duration::minutes(
                self.token_ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES),
            ),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }
}

/// Administrator account created at startup if its username is free
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub auth: AuthSettings,

    /// Default tracing filter when `RUST_LOG` is unset (default: "info")
    #[serde(default)]
    pub log_filter: Option<String>,

    #[serde(default)]
    pub seed_admin: Option<SeedAdmin>,
}

impl AppConfig {
    /// Load configuration from file, apply the environment override, and
    /// validate
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut config: AppConfig = serde_json::from_str(&content)?;
        config.apply_secret_override(std::env::var(JWT_SECRET_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus the environment override
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = AppConfig::default();
        config.apply_secret_override(std::env::var(JWT_SECRET_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace the configured secret with a non-empty override
    pub fn apply_secret_override(&mut self, secret: Option<String>) {
        if let Some(secret) = secret.filter(|s| !s.trim().is_empty()) {
            self.auth.jwt_secret = Some(secret);
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("info")
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".into()));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.body_limit_bytes must be > 0".into(),
            ));
        }

        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.auth.token_ttl_minutes) {
            return Err(ConfigError::Invalid(format!(
                "auth.token_ttl_minutes must be between 1 and {}",
                MAX_TOKEN_TTL_MINUTES
            )));
        }

        if self.auth.cookie_name.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.cookie_name must not be empty".into()));
        }

        let has_secret = self
            .auth
            .jwt_secret
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());

        if self.is_production() && !has_secret {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt_secret (or {}) is required in production",
                JWT_SECRET_ENV
            )));
        }

        if let Some(seed) = &self.seed_admin {
            if seed.username.trim().is_empty() || seed.password.is_empty() {
                return Err(ConfigError::Invalid(
                    "seed_admin needs a username and password".into(),
                ));
            }
        }

        Ok(())
    }
}
