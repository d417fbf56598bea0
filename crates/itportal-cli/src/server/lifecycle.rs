use std::future::Future;
use std::io;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Runs `serve_fn` and logs uptime and the outcome.
pub async fn serve_with_shutdown<F>(
    server_config: &ServerConfig,
    serve_fn: impl FnOnce() -> F,
) -> io::Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    let start_time = Instant::now();

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server bound to all interfaces, ensure a firewall is configured"
        );
    }

    let result = serve_fn().await;
    let uptime = start_time.elapsed();

    match &result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs = uptime.as_secs(),
                "Shutdown completed"
            );
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                kind = ?err.kind(),
                uptime_secs = uptime.as_secs(),
                "Fatal error"
            );

            if let Some(suggestion) = error_suggestion(err) {
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    suggestion,
                    "Recovery suggestion"
                );
            }
        }
    }

    result
}

fn error_suggestion(err: &io::Error) -> Option<&'static str> {
    match err.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("Use a port above 1024 or run with the needed privileges")
        }
        io::ErrorKind::AddrInUse => Some("The port is already in use, pick another PORT"),
        io::ErrorKind::AddrNotAvailable => Some("The HOST address is not assigned to this machine"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_the_serve_result() {
        let config = ServerConfig::default();

        let ok = serve_with_shutdown(&config, || async { Ok(()) }).await;
        assert!(ok.is_ok());

        let err = serve_with_shutdown(&config, || async {
            Err(io::Error::from(io::ErrorKind::AddrInUse))
        })
        .await;
        assert_eq!(err.map_err(|e| e.kind()), Err(io::ErrorKind::AddrInUse));
    }

    #[test]
    fn suggests_fixes_for_bind_errors() {
        let err = io::Error::from(io::ErrorKind::AddrInUse);
        assert!(error_suggestion(&err).is_some());

        let err = io::Error::from(io::ErrorKind::Other);
        assert!(error_suggestion(&err).is_none());
    }
}
