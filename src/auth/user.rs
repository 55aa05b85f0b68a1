//! # User Management
//!
//! User model and repository. Users are stored as documents in the
//! `users` table, keyed by id, with `username` and `email` lookups.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, validate_password, verify_password, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use crate::store::{decode, encode, Store, StoreResult, Table};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// User model, as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Unique login name
    pub username: String,

    /// Unique email address (lowercased)
    pub email: String,

    pub display_name: String,

    #[serde(default)]
    pub bio: String,

    pub role: Role,

    /// Set by moderators; banned users cannot sign in or use their token
    #[serde(default)]
    pub banned: bool,

    /// Argon2id password hash (never plaintext, never sent to clients)
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given credentials
    pub fn new(
        username: String,
        email: &str,
        display_name: Option<String>,
        password: &str,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        validate_password(password, policy)?;
        let password_hash = hash_password(password)?;
        Ok(Self::with_password_hash(username, email, display_name, password_hash))
    }

    /// Create a new user from a password already checked and hashed
    pub fn with_password_hash(
        username: String,
        email: &str,
        display_name: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            display_name: display_name.unwrap_or_else(|| username.clone()),
            username,
            email: normalize_email(email),
            bio: String::new(),
            role: Role::User,
            banned: false,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }

    /// Update the user's password
    pub fn update_password(&mut self, new_password: &str, policy: &PasswordPolicy) -> AuthResult<()> {
        validate_password(new_password, policy)?;
        self.password_hash = hash_password(new_password)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Canonical form of an email address for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Store-backed user repository
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn Store>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Find a user by their ID
    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let key = id.to_string();
        match self.store.get(Table::Users, &key).await? {
            Some(doc) => decode(Table::Users, &key, doc).map(Some),
            None => Ok(None),
        }
    }

    /// Find a user by their username
    pub async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.find_one("username", username).await
    }

    /// Find a user by their email
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_one("email", &normalize_email(email)).await
    }

    /// All users, oldest first
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        let mut users = self
            .store
            .scan(Table::Users)
            .await?
            .into_iter()
            .map(|doc| decode::<User>(Table::Users, "*", doc))
            .collect::<StoreResult<Vec<_>>>()?;
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    /// Create or replace a user
    pub async fn save(&self, user: &User) -> StoreResult<()> {
        let key = user.id.to_string();
        let doc = encode(Table::Users, &key, user)?;
        self.store.put(Table::Users, &key, doc).await
    }

    /// Delete a user, returning whether it existed
    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.store.delete(Table::Users, &id.to_string()).await
    }

    /// Check that neither the username nor the email is registered.
    ///
    /// Both lookups run concurrently. A username conflict is reported in
    /// preference to an email conflict.
    pub async fn ensure_unique(&self, username: &str, email: &str) -> AuthResult<()> {
        let (by_username, by_email) =
            tokio::try_join!(self.find_by_username(username), self.find_by_email(email))?;

        if by_username.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if by_email.is_some() {
            return Err(AuthError::EmailTaken);
        }
        Ok(())
    }

    /// Check that an email is free for the given user to take
    pub async fn ensure_email_available(&self, email: &str, owner: Uuid) -> AuthResult<()> {
        match self.find_by_email(email).await? {
            Some(existing) if existing.id != owner => Err(AuthError::EmailTaken),
            _ => Ok(()),
        }
    }

    async fn find_one(&self, attribute: &str, value: &str) -> StoreResult<Option<User>> {
        let mut docs = self.store.query_index(Table::Users, attribute, value).await?;
        match docs.pop() {
            Some(doc) => decode(Table::Users, value, doc).map(Some),
            None => Ok(None),
        }
    }
}
