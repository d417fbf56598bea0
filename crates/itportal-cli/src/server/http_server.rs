use axum::Router;
use tokio::net::TcpListener;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::{Result, ServerError, serve_with_shutdown, shutdown_signal};

/// Binds the configured address and serves `app` until a shutdown signal.
pub async fn serve(app: Router, server_config: ServerConfig) -> Result<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|source| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %source,
            "Failed to bind to address"
        );

        ServerError::Bind {
            address: server_addr.to_string(),
            source,
        }
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "Server is listening"
    );

    let shutdown = shutdown_signal(server_config.shutdown_timeout());
    serve_with_shutdown(&server_config, || async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    })
    .await?;

    Ok(())
}
