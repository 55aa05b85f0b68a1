//! Shared application state
//!
//! Cloned into every handler. The store is the only shared mutable state.

use std::sync::Arc;

use crate::api::ApiResult;
use crate::articles::ArticleRepository;
use crate::auth::{JwtManager, PasswordPolicy, Role, User, UserRepository};
use crate::config::AppConfig;
use crate::store::{MemoryStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: UserRepository,
    pub articles: ArticleRepository,
    pub jwt: Arc<JwtManager>,
    pub password_policy: Arc<PasswordPolicy>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let jwt = JwtManager::new(config.auth.jwt_config());
        Self {
            users: UserRepository::new(store.clone()),
            articles: ArticleRepository::new(store),
            jwt: Arc::new(jwt),
            password_policy: Arc::new(PasswordPolicy::default()),
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.auth.cookie_name
    }

    /// Create the configured admin account unless its username is taken.
    ///
    /// Returns whether an account was created.
    pub async fn seed_admin(&self) -> ApiResult<bool> {
        let Some(seed) = &self.config.seed_admin else {
            return Ok(false);
        };

        if self.users.find_by_username(&seed.username).await?.is_some() {
            return Ok(false);
        }

        let mut admin = User::new(
            seed.username.clone(),
            &seed.email,
            None,
            &seed.password,
            &self.password_policy,
        )?;
        admin.role = Role::Admin;
        self.users.save(&admin).await?;

        tracing::info!(username = %admin.username, "seeded admin account");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedAdmin;

    fn config_with_seed(password: &str) -> AppConfig {
        AppConfig {
            seed_admin: Some(SeedAdmin {
                username: "root".to_string(),
                email: "root@x.com".to_string(),
                password: password.to_string(),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_seed_admin_once() {
        let state = AppState::in_memory(config_with_seed("Admin123!"));

        assert!(state.seed_admin().await.unwrap());
        assert!(!state.seed_admin().await.unwrap());

        let admin = state.users.find_by_username("root").await.unwrap().unwrap();
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn test_seed_admin_respects_password_policy() {
        let state = AppState::in_memory(config_with_seed("weak"));
        assert!(state.seed_admin().await.is_err());
    }

    #[tokio::test]
    async fn test_no_seed_configured() {
        let state = AppState::in_memory(AppConfig::default());
        assert!(!state.seed_admin().await.unwrap());
    }
}
