// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Warden - an HTTP gateway that authenticates requests through filter hooks.
//!
//! This is the binary entry point.

mod serve;
mod shutdown;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use warden_config::{ConfigError, WardenConfig};

/// Warden - authenticate HTTP requests through pluggable filter hooks.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the authenticating gateway.
    Serve {
        /// Read configuration from this file instead of the XDG hierarchy.
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Load and validate configuration, then exit.
    CheckConfig {
        /// Read configuration from this file instead of the XDG hierarchy.
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

fn load(path: Option<&Path>) -> Result<WardenConfig, Vec<ConfigError>> {
    match path {
        Some(path) => warden_config::load_and_validate_path(path),
        None => warden_config::load_and_validate(),
    }
}

fn summary(config: &WardenConfig) -> String {
    format!(
        "listen={}:{} realm={} basic_users={} bearer_tokens={} require_authentication={}",
        config.server.host,
        config.server.port,
        config.auth.realm,
        config.auth.basic_users.len(),
        config.auth.bearer_tokens.len(),
        config.auth.require_authentication,
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckConfig { config } => match load(config.as_deref()) {
            Ok(config) => {
                println!("warden: config OK ({})", summary(&config));
                ExitCode::SUCCESS
            }
            Err(errors) => {
                warden_config::render_errors(&errors);
                ExitCode::FAILURE
            }
        },
        Commands::Serve { config } => {
            let config = match load(config.as_deref()) {
                Ok(config) => config,
                Err(errors) => {
                    warden_config::render_errors(&errors);
                    return ExitCode::FAILURE;
                }
            };

            serve::init_tracing(&config.logging.level, config.logging.json);
            tracing::debug!(config = %summary(&config), "configuration loaded");

            let cancel = shutdown::install_signal_handler();
            match serve::run_serve(config, cancel).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, "warden serve failed");
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
