//! pressroom - article publishing API
//!
//! Schema-validated JSON endpoints over a document store, JWT cookie
//! authentication, and a single classified error model rendered at the
//! HTTP boundary.

pub mod api;
pub mod articles;
pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
