//! Request ids, trace spans and per-request timing logs.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::header::{self, HeaderName};
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

const TRACING_TARGET: &str = "itportal_server::observability";

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Assigns an `x-request-id` to every request, echoes it on the response
    /// and opens a trace span per request. Credentials are redacted.
    fn with_observability(self) -> Self;

    /// Logs method, path, status and duration of every request.
    fn with_request_timing(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
    }

    fn with_request_timing(self) -> Self {
        self.layer(from_fn(track_request_timing))
    }
}

async fn track_request_timing(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::debug!(
        target: TRACING_TARGET,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = duration.as_millis() as u64,
        "request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn request_ids_are_echoed() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .with_request_timing()
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server.get("/ping").await;
        response.assert_status_ok();
        assert!(response.maybe_header("x-request-id").is_some());

        let response = server
            .get("/ping")
            .add_header("x-request-id", "req-42")
            .await;
        assert_eq!(response.header("x-request-id"), "req-42");
        Ok(())
    }
}
