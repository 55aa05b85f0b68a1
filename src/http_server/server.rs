//! # HTTP Server
//!
//! Builds the router from the route modules and runs it until Ctrl-C.

use std::io;
use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::admin_routes::admin_routes;
use super::article_routes::article_routes;
use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::state::AppState;
use super::user_routes::user_routes;
use crate::api::{ApiError, SuccessResponse};

/// HTTP server for the pressroom API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        let config = state.config.server.clone();
        Self {
            router: build_router(state),
            config,
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C, then drain in-flight requests
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "pressroom API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let config = &state.config.server;
    let cors = cors_layer(config);
    let body_limit = DefaultBodyLimit::max(config.body_limit_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .merge(auth_routes())
        .merge(article_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .fallback(fallback_handler)
        .layer(map_response(method_not_allowed_envelope))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS for the configured origins; anonymous CORS if none
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn health_handler() -> SuccessResponse<Value> {
    SuccessResponse::new(json!({ "status": "ok" }))
}

async fn fallback_handler() -> ApiError {
    ApiError::not_found("Route")
}

/// Renders the router's bare 405 through `ApiError`, keeping `Allow`
async fn method_not_allowed_envelope(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rendered = ApiError::method_not_allowed().into_response();
    if let Some(allow) = allow {
        rendered.headers_mut().insert(header::ALLOW, allow);
    }
    rendered
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
