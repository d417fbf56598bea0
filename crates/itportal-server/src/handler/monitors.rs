//! Health check handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use itportal_postgres::PgClient;
use jiff::Timestamp;

use crate::extract::Json;
use crate::handler::{ErrorKind, Result};
use crate::handler::response::HealthStatus;
use crate::service::ServiceState;

const TRACING_TARGET: &str = "itportal_server::handler::monitors";

/// Reports whether the database answers and how busy the pool is.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> Result<(StatusCode, Json<HealthStatus>)> {
    let database = match pg_client.ping().await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(target: TRACING_TARGET, error = %error, "database ping failed");
            false
        }
    };

    let pool = pg_client.pool_status();
    if pool.is_under_pressure() {
        tracing::warn!(
            target: TRACING_TARGET,
            waiting = pool.waiting,
            utilization = pool.utilization(),
            "connection pool under pressure"
        );
    }

    let is_healthy = database;

    let response = HealthStatus {
        is_healthy,
        database,
        pool: pool.into(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        checked_at: Timestamp::now(),
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        ErrorKind::ServiceUnavailable.status_code()
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "health status prepared"
    );

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get system health status")
        .response::<200, Json<HealthStatus>>()
        .response::<503, Json<HealthStatus>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Health"))
}
