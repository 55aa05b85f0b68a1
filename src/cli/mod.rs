//! CLI module for pressroom
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API server
//! - check-config: Validate and print the configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, load_config, redacted, run, run_command, serve, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
