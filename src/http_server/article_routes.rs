//! Article HTTP Routes
//!
//! Public listing and reading, plus author CRUD. Drafts and hidden
//! articles are only visible to their author and to admins; to everyone
//! else they do not exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::extract::{
    check, deserialize, parse_id, parse_validated, query_object, with_path_id, AuthUser, JsonBody,
    MaybeAuthUser, QueryParams,
};
use super::state::AppState;
use crate::api::{ApiError, ApiResult, SuccessResponse};
use crate::articles::{Article, ArticleFilter, ArticleStatus, Category};
use crate::auth::User;
use crate::schema::{CREATE_ARTICLE, DELETE_ARTICLE, GET_ARTICLE, LIST_ARTICLES, UPDATE_ARTICLE};

/// Listing size when no `limit` is given
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Largest accepted `limit`
pub const MAX_LIST_LIMIT: usize = 100;

/// Article routes
pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_handler).post(create_handler))
        .route(
            "/articles/:id",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<Category>,
    author: Option<String>,
    limit: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CreateArticleRequest {
    title: String,
    body: String,
    category: Category,
    summary: Option<String>,
    tags: Option<Vec<String>>,
    status: Option<ArticleStatus>,
}

#[derive(Debug, Deserialize)]
struct UpdateArticleRequest {
    title: Option<String>,
    body: Option<String>,
    category: Option<Category>,
    summary: Option<String>,
    tags: Option<Vec<String>>,
    status: Option<ArticleStatus>,
}

fn clamp_limit(limit: Option<f64>) -> usize {
    match limit {
        Some(n) if n.is_finite() => n.floor().clamp(1.0, MAX_LIST_LIMIT as f64) as usize,
        _ => DEFAULT_LIST_LIMIT,
    }
}

/// Load an article the caller may see, else 404
async fn find_visible(state: &AppState, id: &str, viewer: Option<&User>) -> ApiResult<Article> {
    let id = parse_id(id, "Article")?;
    match state.articles.find(id).await? {
        Some(article) if article.is_visible_to(viewer) => Ok(article),
        _ => Err(ApiError::not_found("Article")),
    }
}

/// Load an article the caller may modify
async fn find_editable(state: &AppState, id: &str, user: &User) -> ApiResult<Article> {
    let article = find_visible(state, id, Some(user)).await?;
    if !article.can_edit(user) {
        return Err(ApiError::forbidden("Only the author or an admin can modify this article"));
    }
    Ok(article)
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> ApiResult<SuccessResponse<Vec<Article>>> {
    let query: ListQuery = parse_validated(query_object(&params, &LIST_ARTICLES), &LIST_ARTICLES)?;

    let author_id = match query.author.as_deref().map(str::trim) {
        Some(username) => match state.users.find_by_username(username).await? {
            Some(author) => Some(author.id),
            None => return Ok(SuccessResponse::new(Vec::new())),
        },
        None => None,
    };

    let filter = ArticleFilter {
        category: query.category,
        author_id,
        limit: Some(clamp_limit(query.limit)),
    };
    let articles = state.articles.list_public(&filter).await?;
    Ok(SuccessResponse::new(articles))
}

async fn create_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, SuccessResponse<Article>)> {
    let request: CreateArticleRequest = parse_validated(body, &CREATE_ARTICLE)?;

    let article = Article::new(
        &user,
        request.title.trim().to_string(),
        request.body,
        request.category,
        request.summary,
        request.tags.unwrap_or_default(),
        request.status.unwrap_or_default(),
    );
    state.articles.save(&article).await?;

    tracing::info!(article_id = %article.id, author = %user.username, "article created");
    Ok((StatusCode::CREATED, SuccessResponse::new(article)))
}

async fn get_handler(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(id): Path<String>,
) -> ApiResult<SuccessResponse<Article>> {
    check(&json!({ "id": id }), &GET_ARTICLE)?;
    let article = find_visible(&state, &id, viewer.as_ref()).await?;
    Ok(SuccessResponse::new(article))
}

async fn update_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<SuccessResponse<Article>> {
    let body = with_path_id(body, &id);
    check(&body, &UPDATE_ARTICLE)?;
    let mut article = find_editable(&state, &id, &user).await?;
    let request: UpdateArticleRequest = deserialize(body)?;

    if let Some(title) = request.title {
        article.title = title.trim().to_string();
    }
    if let Some(body) = request.body {
        article.body = body;
    }
    if let Some(category) = request.category {
        article.category = category;
    }
    if let Some(summary) = request.summary {
        article.summary = Some(summary);
    }
    if let Some(tags) = request.tags {
        article.tags = tags;
    }
    if let Some(status) = request.status {
        article.status = status;
    }
    article.touch();
    state.articles.save(&article).await?;

    tracing::info!(article_id = %article.id, editor = %user.username, "article updated");
    Ok(SuccessResponse::new(article))
}

async fn delete_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<SuccessResponse<Value>> {
    check(&json!({ "id": id }), &DELETE_ARTICLE)?;
    let article = find_editable(&state, &id, &user).await?;
    state.articles.delete(article.id).await?;

    tracing::info!(article_id = %article.id, editor = %user.username, "article deleted");
    Ok(SuccessResponse::new(json!({ "id": article.id })))
}
