//! Shared harness for API tests
//!
//! Drives the real router in-process with `tower::ServiceExt::oneshot`.
//! Every `TestApp` owns a fresh store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use pressroom::auth::{Role, User};
use pressroom::config::AppConfig;
use pressroom::http_server::{build_router, AppState};
use pressroom::store::{MemoryStore, Store};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Password1!";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error_code(&self) -> &str {
        self.body["errorCode"].as_str().unwrap_or_default()
    }

    pub fn details(&self) -> Vec<String> {
        self.body["details"]
            .as_array()
            .map(|d| d.iter().map(|v| v.as_str().unwrap().to_string()).collect())
            .unwrap_or_default()
    }

    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    /// Token from the `token=...` Set-Cookie header
    pub fn cookie_token(&self) -> Option<String> {
        let cookie = self.set_cookie()?;
        let pair = cookie.split(';').next()?;
        pair.strip_prefix("token=")
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = Some(SECRET.to_string());
    config
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let state = AppState::new(config, store);
        let router = build_router(state.clone());
        Self { state, router }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// JSON request with an optional bearer token
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Raw body with an explicit content type
    pub async fn post_raw(
        &self,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: &str,
    ) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Sign up through the API and return the session token
    pub async fn sign_up(&self, username: &str) -> String {
        let response = self
            .post(
                "/auth/sign-up",
                None,
                json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": PASSWORD
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.cookie_token().unwrap()
    }

    /// Sign up, promote to admin in the store, and return a token
    pub async fn sign_up_admin(&self, username: &str) -> String {
        let token = self.sign_up(username).await;
        let mut user = self.user(username).await;
        user.role = Role::Admin;
        self.state.users.save(&user).await.unwrap();
        token
    }

    pub async fn user(&self, username: &str) -> User {
        self.state
            .users
            .find_by_username(username)
            .await
            .unwrap()
            .unwrap()
    }

    /// Create an article through the API and return its id
    pub async fn create_article(&self, token: &str, title: &str, status: &str) -> String {
        let response = self
            .post(
                "/articles",
                Some(token),
                json!({
                    "title": title,
                    "body": "Body text",
                    "category": "science",
                    "status": status
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"].as_str().unwrap().to_string()
    }
}
