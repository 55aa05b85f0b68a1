//! Auth HTTP Routes
//!
//! Sign-up, sign-in and sign-out. The access token travels in an HTTP-only
//! cookie; `Authorization: Bearer` is accepted as well.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use super::extract::{auth_cookie, deserialize, parse_validated, removal_cookie, AuthUser, JsonBody};
use super::state::AppState;
use super::views::AccountView;
use crate::api::{ApiError, ApiResult, SuccessResponse};
use crate::auth::{hash_password_blocking, validate_password, AuthError, User};
use crate::schema::{format_violations, SIGN_IN, SIGN_UP};

/// Auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(sign_up_handler))
        .route("/auth/sign-in", post(sign_in_handler))
        .route("/auth/sign-out", post(sign_out_handler))
        .route("/auth/me", get(me_handler))
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest {
    username: String,
    email: String,
    password: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignInRequest {
    username: String,
    password: String,
}

// ==================
// Handlers
// ==================

async fn sign_up_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, CookieJar, SuccessResponse<AccountView>)> {
    let mut violations = SIGN_UP.validate(&body);
    violations.extend(format_violations(&body, &SIGN_UP));
    if !violations.is_empty() {
        return Err(ApiError::validation_failed(violations));
    }
    let request: SignUpRequest = deserialize(body)?;

    validate_password(&request.password, &state.password_policy)?;
    state
        .users
        .ensure_unique(&request.username, &request.email)
        .await?;

    let display_name = request
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let password_hash = hash_password_blocking(request.password).await?;
    let user = User::with_password_hash(
        request.username,
        &request.email,
        display_name,
        password_hash,
    );

    // Issue the token first so a missing signing key leaves no orphan account
    let token = state.jwt.generate_access_token(&user)?;
    state.users.save(&user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "user signed up");

    Ok((
        StatusCode::CREATED,
        jar.add(auth_cookie(&state, token)),
        SuccessResponse::new(AccountView::from(&user)),
    ))
}

async fn sign_in_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody,
) -> ApiResult<(CookieJar, SuccessResponse<AccountView>)> {
    let request: SignInRequest = parse_validated(body, &SIGN_IN)?;

    let user = match state.users.find_by_username(&request.username).await? {
        Some(user) if user.verify_password(&request.password)? => user,
        _ => {
            tracing::debug!(username = %request.username, "sign-in rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    if user.banned {
        return Err(AuthError::AccountSuspended.into());
    }

    let token = state.jwt.generate_access_token(&user)?;
    tracing::info!(user_id = %user.id, "user signed in");

    Ok((
        jar.add(auth_cookie(&state, token)),
        SuccessResponse::new(AccountView::from(&user)),
    ))
}

async fn sign_out_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, SuccessResponse<Value>) {
    (
        jar.remove(removal_cookie(&state)),
        SuccessResponse::new(json!({ "signedOut": true })),
    )
}

async fn me_handler(AuthUser(user): AuthUser) -> SuccessResponse<AccountView> {
    SuccessResponse::new(AccountView::from(&user))
}
