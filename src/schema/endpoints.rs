//! Endpoint schemas
//!
//! One schema per endpoint that accepts input. Path parameters are merged
//! into the validated object under `id` before validation.

use super::types::{FieldDef, FieldType, Schema};

/// Article categories, in display order
pub const CATEGORIES: &[&str] = &[
    "technology",
    "science",
    "culture",
    "business",
    "lifestyle",
    "opinion",
];

/// Article publication states
pub const ARTICLE_STATUSES: &[&str] = &["draft", "published"];

/// User roles
pub const ROLES: &[&str] = &["user", "admin"];

const TAGS: FieldType = FieldType::Array(Some(&FieldType::String));

pub const SIGN_UP: Schema = Schema::new(
    "sign_up",
    &[
        FieldDef::required("username", FieldType::String),
        FieldDef::required("email", FieldType::String),
        FieldDef::required("password", FieldType::String),
        FieldDef::optional("displayName", FieldType::String),
    ],
);

pub const SIGN_IN: Schema = Schema::new(
    "sign_in",
    &[
        FieldDef::required("username", FieldType::String),
        FieldDef::required("password", FieldType::String),
    ],
);

pub const CREATE_ARTICLE: Schema = Schema::new(
    "create_article",
    &[
        FieldDef::required("title", FieldType::String),
        FieldDef::required("body", FieldType::String),
        FieldDef::required("category", FieldType::Enum(CATEGORIES)),
        FieldDef::optional("summary", FieldType::String),
        FieldDef::optional("tags", TAGS),
        FieldDef::optional("status", FieldType::Enum(ARTICLE_STATUSES)),
    ],
);

pub const UPDATE_ARTICLE: Schema = Schema::new(
    "update_article",
    &[
        FieldDef::required("id", FieldType::String),
        FieldDef::optional("title", FieldType::String),
        FieldDef::optional("body", FieldType::String),
        FieldDef::optional("category", FieldType::Enum(CATEGORIES)),
        FieldDef::optional("summary", FieldType::String),
        FieldDef::optional("tags", TAGS),
        FieldDef::optional("status", FieldType::Enum(ARTICLE_STATUSES)),
    ],
);

pub const GET_ARTICLE: Schema =
    Schema::new("get_article", &[FieldDef::required("id", FieldType::String)]);

pub const DELETE_ARTICLE: Schema =
    Schema::new("delete_article", &[FieldDef::required("id", FieldType::String)]);

pub const LIST_ARTICLES: Schema = Schema::new(
    "list_articles",
    &[
        FieldDef::optional("category", FieldType::Enum(CATEGORIES)),
        FieldDef::optional("author", FieldType::String),
        FieldDef::optional("limit", FieldType::Number),
    ],
);

pub const UPDATE_SETTINGS: Schema = Schema::new(
    "update_settings",
    &[
        FieldDef::optional("displayName", FieldType::String),
        FieldDef::optional("bio", FieldType::String),
        FieldDef::optional("email", FieldType::String),
        FieldDef::optional("password", FieldType::String),
        FieldDef::optional("currentPassword", FieldType::String),
    ],
);

pub const MODERATE_USER: Schema = Schema::new(
    "moderate_user",
    &[
        FieldDef::required("id", FieldType::String),
        FieldDef::optional("role", FieldType::Enum(ROLES)),
        FieldDef::optional("banned", FieldType::Boolean),
    ],
);

pub const MODERATE_ARTICLE: Schema = Schema::new(
    "moderate_article",
    &[
        FieldDef::required("id", FieldType::String),
        FieldDef::required("hidden", FieldType::Boolean),
        FieldDef::optional("moderationNote", FieldType::String),
    ],
);

/// Every endpoint schema, for startup checks
pub const ALL: &[&Schema] = &[
    &SIGN_UP,
    &SIGN_IN,
    &CREATE_ARTICLE,
    &UPDATE_ARTICLE,
    &GET_ARTICLE,
    &DELETE_ARTICLE,
    &LIST_ARTICLES,
    &UPDATE_SETTINGS,
    &MODERATE_USER,
    &MODERATE_ARTICLE,
];
