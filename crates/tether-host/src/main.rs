// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tether: tracker command bridge host
//
// Entry point. Loads config, initialises logging, builds the command router
// over the platform SDK, and serves line-delimited JSON on stdin/stdout.
// Logs go to stderr so they never interleave with protocol output.

mod protocol;
mod services;

use std::process::ExitCode;
use std::sync::Arc;

use tether_core::BridgeConfig;
use tether_router::CommandRouter;
use tokio::io::BufReader;

use services::host::{ChannelNotifier, HostSession, outbound_channel};
use services::{data_dir, settings};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = data_dir::config_path();
    let (config, load_error) = match settings::load_config(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (BridgeConfig::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Tether host starting");
    if let Some(e) = load_error {
        tracing::warn!(
            error = %e,
            path = %config_path.display(),
            "config unreadable, using defaults"
        );
    }

    let (outbound, rx) = outbound_channel();
    let notifier = Arc::new(ChannelNotifier::new(outbound.clone()));
    let router = match CommandRouter::new(tether_sdk::platform_sdk(), notifier, config) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!(error = %e, "command table failed to build");
            return ExitCode::FAILURE;
        }
    };

    let session = HostSession::new(Arc::new(router), outbound);
    let stdin = BufReader::new(tokio::io::stdin());
    match session.run(stdin, tokio::io::stdout(), rx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "host session failed");
            ExitCode::FAILURE
        }
    }
}
