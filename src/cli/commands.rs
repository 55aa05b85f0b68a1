//! CLI command implementations
//!
//! Commands load the configuration, then either run the server or report
//! on the configuration. Nothing here outlives the command.

use std::path::{Path, PathBuf};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};
use crate::observability::init_logging;

/// Config file used when `--config` is not given and it exists
pub const DEFAULT_CONFIG_PATH: &str = "./pressroom.json";

const REDACTED: &str = "<redacted>";

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(config.as_deref()),
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `./pressroom.json` is used if
/// present, else the defaults (plus the secret from the environment).
pub fn load_config(path: Option<&Path>) -> CliResult<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                AppConfig::load(&default_path)?
            } else {
                AppConfig::from_env()?
            }
        }
    };
    Ok(config)
}

/// Start the HTTP API server and block until shutdown
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    init_logging(&config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let state = AppState::in_memory(config);

        if !state.jwt.is_configured() {
            tracing::warn!(
                "no JWT signing secret configured; sign-up and sign-in will fail until one is set"
            );
        }

        state
            .seed_admin()
            .await
            .map_err(|e| CliError::boot_failed(format!("Failed to seed admin account: {}", e)))?;

        HttpServer::new(state)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate the configuration and print it with secrets redacted
pub fn check_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    println!("{}", serde_json::to_string_pretty(&redacted(&config))?);
    Ok(())
}

/// Copy of the config safe to print
pub fn redacted(config: &AppConfig) -> AppConfig {
    let mut copy = config.clone();
    if copy.auth.jwt_secret.is_some() {
        copy.auth.jwt_secret = Some(REDACTED.to_string());
    }
    if let Some(seed) = copy.seed_admin.as_mut() {
        seed.password = REDACTED.to_string();
    }
    copy
}
