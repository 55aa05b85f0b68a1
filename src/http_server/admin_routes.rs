//! Admin HTTP Routes
//!
//! Moderation of users (role, ban) and articles (hide with a note). Every
//! route requires an admin caller.

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use super::extract::{parse_id, parse_validated, with_path_id, AdminUser, JsonBody};
use super::state::AppState;
use super::views::AccountView;
use crate::api::{ApiError, ApiResult, SuccessResponse};
use crate::articles::Article;
use crate::auth::Role;
use crate::schema::{MODERATE_ARTICLE, MODERATE_USER};

/// Admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users_handler))
        .route("/admin/users/:id", patch(moderate_user_handler))
        .route("/admin/articles", get(list_articles_handler))
        .route("/admin/articles/:id", patch(moderate_article_handler))
}

#[derive(Debug, Deserialize)]
struct ModerateUserRequest {
    role: Option<Role>,
    banned: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModerateArticleRequest {
    hidden: bool,
    moderation_note: Option<String>,
}

async fn list_users_handler(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<SuccessResponse<Vec<AccountView>>> {
    let users = state.users.list().await?;
    Ok(SuccessResponse::new(users.iter().map(AccountView::from).collect()))
}

async fn moderate_user_handler(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<SuccessResponse<AccountView>> {
    let request: ModerateUserRequest = parse_validated(with_path_id(body, &id), &MODERATE_USER)?;

    let mut target = state
        .users
        .find_by_id(parse_id(&id, "User")?)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    if target.id == admin.id
        && (request.banned == Some(true) || request.role == Some(Role::User))
    {
        return Err(ApiError::forbidden("Admins cannot ban or demote themselves"));
    }

    if let Some(role) = request.role {
        target.role = role;
    }
    if let Some(banned) = request.banned {
        target.banned = banned;
    }
    target.updated_at = Utc::now();
    state.users.save(&target).await?;

    tracing::info!(
        admin = %admin.username,
        user_id = %target.id,
        role = target.role.as_str(),
        banned = target.banned,
        "user moderated"
    );
    Ok(SuccessResponse::new(AccountView::from(&target)))
}

async fn list_articles_handler(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<SuccessResponse<Vec<Article>>> {
    Ok(SuccessResponse::new(state.articles.list_all().await?))
}

async fn moderate_article_handler(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<SuccessResponse<Article>> {
    let request: ModerateArticleRequest =
        parse_validated(with_path_id(body, &id), &MODERATE_ARTICLE)?;

    let mut article = state
        .articles
        .find(parse_id(&id, "Article")?)
        .await?
        .ok_or_else(|| ApiError::not_found("Article"))?;

    article.hidden = request.hidden;
    article.moderation_note = request.moderation_note;
    state.articles.save(&article).await?;

    tracing::info!(
        admin = %admin.username,
        article_id = %article.id,
        hidden = article.hidden,
        "article moderated"
    );
    Ok(SuccessResponse::new(article))
}
