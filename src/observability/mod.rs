//! Logging setup
//!
//! One `tracing` subscriber for the whole process. `RUST_LOG` takes
//! precedence over the configured filter. Production emits one JSON object
//! per line; development emits plain text.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(config: &AppConfig) {
    let filter = create_env_filter(std::env::var("RUST_LOG").ok(), config.log_filter());

    let installed = if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_current_span(false))
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(
            environment = ?config.environment,
            "logging initialized"
        );
    }
}

/// Pick the filter directive: a non-blank `RUST_LOG`, else the configured one
fn resolve_directive(env: Option<String>, configured: &str) -> String {
    env.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

fn create_env_filter(env: Option<String>, configured: &str) -> EnvFilter {
    let directive = resolve_directive(env, configured);

    EnvFilter::try_new(&directive).unwrap_or_else(|_| {
        eprintln!(
            "Failed to parse filter directive: {}. Falling back to default: info",
            directive
        );
        EnvFilter::new("info")
    })
}
