//! hello-api
//!
//! A minimal HTTP API built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────▶ net::listener ──▶ net::connection ──▶ http::middleware ──▶ handlers
//!                  (bounded)        (HTTP/1 + HTTP/2)    (recovery, id,        (health,
//!                                                         log, headers, CORS)   hello)
//!
//!     Cross-cutting: config (defaults → TOML → env), observability
//!     (tracing, metrics), lifecycle (start, signal, drain with deadline)
//! ```

use std::process::ExitCode;

use hello_api::config::load_from_env;
use hello_api::lifecycle::{shutdown_signal, StopOutcome};
use hello_api::observability::{init_tracing, metrics};
use hello_api::ApiServer;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Server failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside local development.
    dotenvy::dotenv().ok();

    let config = load_from_env()?;
    init_tracing(config.environment);

    tracing::info!(
        version = %config.version,
        environment = %config.environment,
        bind_address = %config.listener.bind_address(),
        max_connections = config.listener.max_connections,
        shutdown_timeout_secs = config.shutdown.timeout_secs,
        "Configuration loaded"
    );

    if config.environment.is_production() && config.cors.uses_default {
        tracing::warn!(
            origins = ?config.cors.allowed_origins,
            "CORS_ALLOWED_ORIGINS not set, using placeholder production origins"
        );
    }

    if let Some(addr) = config.observability.metrics_socket_addr() {
        metrics::init_metrics(addr?)?;
    }

    let server = ApiServer::new(config);
    match server.run(shutdown_signal()).await? {
        StopOutcome::Drained => tracing::info!("Shutdown complete"),
        StopOutcome::Forced { remaining } => {
            tracing::warn!(remaining, "Shutdown complete, connections closed forcibly")
        }
    }

    Ok(())
}
