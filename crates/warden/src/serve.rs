// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden serve` command implementation.
//!
//! Builds the filter pipeline from `[auth]`, then runs the gateway until the
//! shutdown token is cancelled.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use warden_config::WardenConfig;
use warden_core::WardenError;
use warden_filters::build_pipeline;
use warden_gateway::{ServerConfig, start_server};

/// Crates whose log output follows `[logging] level`.
const WARDEN_TARGETS: &[&str] = &[
    "warden",
    "warden_core",
    "warden_config",
    "warden_filters",
    "warden_gateway",
];

/// Runs the gateway with the authentication pipeline described by `config`.
pub async fn run_serve(config: WardenConfig, shutdown: CancellationToken) -> Result<(), WardenError> {
    let pipeline = Arc::new(build_pipeline(&config.auth));
    info!(
        filters = ?pipeline.filter_names(),
        realm = %config.auth.realm,
        "starting warden serve"
    );

    let server = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server, pipeline, shutdown).await?;

    info!("warden serve shutdown complete");
    Ok(())
}

/// `EnvFilter` directives for `level`: warden crates at `level`, the rest at warn.
pub fn filter_directives(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WARDEN_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.push(format!("tower_http={level}"));
    directives.join(",")
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
