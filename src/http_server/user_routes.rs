//! User HTTP Routes
//!
//! Public profiles and the signed-in user's own account settings.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::extract::{deserialize, removal_cookie, AuthUser, JsonBody};
use super::state::AppState;
use super::views::{AccountView, ProfileView, UserView};
use crate::api::{ApiError, ApiResult, SuccessResponse};
use crate::articles::ArticleFilter;
use crate::auth::normalize_email;
use crate::schema::{format_violations, Violation, UPDATE_SETTINGS};

/// User and account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:username", get(profile_handler))
        .route(
            "/account",
            get(account_handler)
                .patch(update_account_handler)
                .delete(delete_account_handler),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSettingsRequest {
    display_name: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    password: Option<String>,
    current_password: Option<String>,
}

async fn profile_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<SuccessResponse<ProfileView>> {
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    let articles = state
        .articles
        .list_public(&ArticleFilter {
            author_id: Some(user.id),
            ..Default::default()
        })
        .await?;

    Ok(SuccessResponse::new(ProfileView {
        user: UserView::from(&user),
        articles,
    }))
}

async fn account_handler(AuthUser(user): AuthUser) -> SuccessResponse<AccountView> {
    SuccessResponse::new(AccountView::from(&user))
}

async fn update_account_handler(
    State(state): State<AppState>,
    AuthUser(mut user): AuthUser,
    JsonBody(body): JsonBody,
) -> ApiResult<SuccessResponse<AccountView>> {
    let mut violations = UPDATE_SETTINGS.validate(&body);
    violations.extend(format_violations(&body, &UPDATE_SETTINGS));
    if body.get("password").is_some_and(|p| !p.is_null())
        && body.get("currentPassword").map_or(true, Value::is_null)
    {
        violations.push(Violation::missing_field("currentPassword"));
    }
    if !violations.is_empty() {
        return Err(ApiError::validation_failed(violations));
    }
    let request: UpdateSettingsRequest = deserialize(body)?;

    if let Some(password) = &request.password {
        let current = request.current_password.as_deref().unwrap_or_default();
        if !user.verify_password(current)? {
            return Err(ApiError::forbidden("Current password is incorrect"));
        }
        user.update_password(password, &state.password_policy)?;
        tracing::info!(user_id = %user.id, "password changed");
    }

    if let Some(email) = &request.email {
        state.users.ensure_email_available(email, user.id).await?;
        user.email = normalize_email(email);
    }
    if let Some(display_name) = request.display_name {
        user.display_name = display_name.trim().to_string();
    }
    if let Some(bio) = request.bio {
        user.bio = bio;
    }

    user.updated_at = Utc::now();
    state.users.save(&user).await?;

    Ok(SuccessResponse::new(AccountView::from(&user)))
}

async fn delete_account_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, SuccessResponse<Value>)> {
    let removed = state.articles.delete_by_author(user.id).await?;
    state.users.delete(user.id).await?;

    tracing::info!(user_id = %user.id, articles = removed, "account deleted");

    Ok((
        jar.remove(removal_cookie(&state)),
        SuccessResponse::new(json!({ "id": user.id, "articlesDeleted": removed })),
    ))
}
