//! Client-facing user views
//!
//! The stored `User` carries the password hash, so it is never serialized
//! to clients directly.

use serde::Serialize;

use crate::articles::Article;
use crate::auth::{Role, User};

/// Public profile fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub role: Role,
    pub created_at: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Account fields shown to the account owner and to admins
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    #[serde(flatten)]
    pub profile: UserView,
    pub email: String,
    pub banned: bool,
    pub updated_at: String,
}

impl From<&User> for AccountView {
    fn from(user: &User) -> Self {
        Self {
            profile: UserView::from(user),
            email: user.email.clone(),
            banned: user.banned,
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Public profile plus the author's visible articles
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user: UserView,
    pub articles: Vec<Article>,
}
