//! CLI argument definitions using clap
//!
//! Commands:
//! - pressroom serve [--config <path>]
//! - pressroom check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pressroom - article publishing API server
#[derive(Parser, Debug)]
#[command(name = "pressroom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load and validate the configuration, then print it
    CheckConfig {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
