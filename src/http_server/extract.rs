//! Request extractors
//!
//! Body, query and identity extraction. Every rejection is an `ApiError`,
//! so malformed input and auth failures are rendered by the same boundary
//! as handler errors.

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use super::state::AppState;
use crate::api::{ApiError, ApiResult, ErrorCode};
use crate::auth::{AuthError, JwtManager, User};
use crate::schema::{FieldType, Schema};

// ==================
// Body
// ==================

/// A request body that parsed as a JSON object.
///
/// Invalid JSON, a missing or wrong content type, and non-object JSON are
/// all rejected as `MALFORMED_BODY` before the handler runs.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::malformed_body(rejection.body_text()))?;

        if !value.is_object() {
            return Err(ApiError::malformed_body("Request body must be a JSON object"));
        }

        Ok(JsonBody(value))
    }
}

/// Raw query-string parameters
#[derive(Debug, Clone, Default)]
pub struct QueryParams(pub HashMap<String, String>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::malformed_body(rejection.body_text()))?;
        Ok(QueryParams(params))
    }
}

/// Build a validatable object from query parameters.
///
/// Query values are always strings, so fields the schema declares as
/// numbers or booleans are converted when they parse. Values that don't
/// parse are left as strings and fail validation.
pub fn query_object(params: &HashMap<String, String>, schema: &Schema) -> Value {
    let mut obj = Map::new();

    for (key, raw) in params {
        let value = match schema.field(key).map(|f| &f.field_type) {
            Some(FieldType::Number) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(raw.clone())),
            Some(FieldType::Boolean) => match raw.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(raw.clone()),
            },
            _ => Value::String(raw.clone()),
        };
        obj.insert(key.clone(), value);
    }

    Value::Object(obj)
}

/// Validate against a schema, failing with every violation at once
pub fn check(body: &Value, schema: &Schema) -> ApiResult<()> {
    let violations = schema.validate(body);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_failed(violations))
    }
}

/// Deserialize an already validated object into a typed request
pub fn deserialize<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| {
        ApiError::user(
            ErrorCode::ValidationFailed,
            StatusCode::BAD_REQUEST,
            "Request validation failed",
        )
        .with_details(vec![e.to_string()])
    })
}

/// Validate, then deserialize
pub fn parse_validated<T: DeserializeOwned>(body: Value, schema: &Schema) -> ApiResult<T> {
    check(&body, schema)?;
    deserialize(body)
}

/// Merge a path parameter into the object under `id`
pub fn with_path_id(mut body: Value, id: &str) -> Value {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("id".to_string(), Value::String(id.to_string()));
    }
    body
}

/// Parse a path id; an unparseable id cannot name an existing resource
pub fn parse_id(id: &str, resource: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found(resource))
}

// ==================
// Identity
// ==================

/// The signed-in, non-banned caller
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// The caller if a valid token was sent
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<User>);

/// A signed-in admin
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = request_token(&parts.headers, state.cookie_name())
            .ok_or_else(ApiError::authentication_required)?;
        authenticate(&token, state).await.map(AuthUser)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = request_token(&parts.headers, state.cookie_name()) else {
            return Ok(MaybeAuthUser(None));
        };

        match authenticate(&token, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(e) if e.is_internal() => Err(e),
            // A stale or foreign token reads as anonymous
            Err(_) => Ok(MaybeAuthUser(None)),
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminUser(user))
    }
}

/// Bearer token if present, else the auth cookie
fn request_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

async fn authenticate(token: &str, state: &AppState) -> ApiResult<User> {
    let claims = state.jwt.validate_token(token)?;
    let id = JwtManager::get_user_id(&claims)?;

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(AuthError::InvalidToken)?;

    if user.banned {
        return Err(AuthError::AccountSuspended.into());
    }
    Ok(user)
}

// ==================
// Cookies
// ==================

/// The HTTP-only cookie carrying an access token
pub fn auth_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((state.cookie_name().to_string(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.is_production())
        .path("/")
        .build()
}

/// A cookie that removes the auth cookie when passed to `CookieJar::remove`
pub fn removal_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.cookie_name().to_string(), ""))
        .path("/")
        .build()
}
