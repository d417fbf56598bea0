#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use itportal_server::handler::routes;
use itportal_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
    SecurityHeadersConfig,
};
use itportal_server::service::{ServiceConfig, ServiceState};

use crate::config::{Cli, MiddlewareConfig};

pub const TRACING_TARGET_SERVER_STARTUP: &str = "itportal_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "itportal_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "itportal_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting IT Portal API"
    );

    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli.service).await?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server)
        .await
        .context("server stopped unexpectedly")?;

    Ok(())
}

/// Connects to Postgres, applies migrations and builds the shared state.
async fn create_service_state(config: &ServiceConfig) -> anyhow::Result<ServiceState> {
    ServiceState::from_config(config)
        .await
        .context("failed to create service state")
}

/// Middleware is applied innermost first:
/// routes, security, observability, then recovery as the outermost layer.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_open_api(&middleware.openapi)
        .with_state(state)
        .with_security(&middleware.cors, &SecurityHeadersConfig::default())
        .with_observability()
        .with_request_timing()
        .with_recovery(&middleware.recovery)
}
