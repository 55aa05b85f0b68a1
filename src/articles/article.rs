//! Article model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;

/// Article category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Science,
    Culture,
    Business,
    Lifestyle,
    Opinion,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Technology,
        Category::Science,
        Category::Culture,
        Category::Business,
        Category::Lifestyle,
        Category::Opinion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Culture => "culture",
            Category::Business => "business",
            Category::Lifestyle => "lifestyle",
            Category::Opinion => "opinion",
        }
    }
}

/// Publication state chosen by the author
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
}

impl ArticleStatus {
    pub const ALL: [ArticleStatus; 2] = [ArticleStatus::Draft, ArticleStatus::Published];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
        }
    }
}

/// Article model, as stored and as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ArticleStatus,

    /// Set by moderators; hidden articles are only visible to author and admins
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_note: Option<String>,

    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article owned by `author`
    pub fn new(
        author: &User,
        title: String,
        body: String,
        category: Category,
        summary: Option<String>,
        tags: Vec<String>,
        status: ArticleStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            summary,
            body,
            category,
            tags,
            status,
            hidden: false,
            moderation_note: None,
            author_id: author.id,
            author_username: author.username.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Published and not hidden by a moderator
    pub fn is_public(&self) -> bool {
        self.status == ArticleStatus::Published && !self.hidden
    }

    /// Author or admin
    pub fn can_edit(&self, user: &User) -> bool {
        self.author_id == user.id || user.is_admin()
    }

    /// Whether `viewer` may read this article
    pub fn is_visible_to(&self, viewer: Option<&User>) -> bool {
        self.is_public() || viewer.map(|u| self.can_edit(u)).unwrap_or(false)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
