//! # Pressroom HTTP Server Module
//!
//! The axum API: shared state, extractors, route modules, and the server
//! that combines them.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/auth/*` - Sign-up, sign-in, sign-out, current user
//! - `/articles/*` - Article listing and CRUD
//! - `/users/:username`, `/account` - Profiles and account settings
//! - `/admin/*` - User and article moderation

pub mod config;
pub mod extract;
pub mod server;
pub mod state;
pub mod views;

mod admin_routes;
mod article_routes;
mod auth_routes;
mod user_routes;

pub use article_routes::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
pub use state::AppState;
