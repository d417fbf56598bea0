//! HTTP listener with graceful shutdown.

mod http_server;
mod lifecycle;
mod shutdown;

pub use http_server::serve;
use lifecycle::serve_with_shutdown;
use shutdown::shutdown_signal;

/// Errors that stop the listener.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;
