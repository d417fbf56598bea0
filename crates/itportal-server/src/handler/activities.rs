//! Activity log and quota handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use itportal_postgres::PgClient;
use itportal_postgres::query::{ActivityRepository, UserRepository};

use crate::extract::{Json, ValidateJson};
use crate::handler::request::{BulkUpdateTargetQuota, UpdateActivityRequest};
use crate::handler::response::{Activity, Envelope, ErrorResponse, TargetQuotas};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

const TRACING_TARGET: &str = "itportal_server::handler::activities";

/// Sets `targetquota` on the listed users.
#[tracing::instrument(skip_all, fields(users = request.ids.len()))]
async fn bulk_update_target_quota(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<BulkUpdateTargetQuota>,
) -> Result<(StatusCode, Json<Envelope<TargetQuotas>>)> {
    let user_ids = request.user_ids();

    let mut conn = pg_client.get_connection().await?;
    let updated = conn
        .bulk_update_target_quota(&user_ids, request.targetquota.trim())
        .await?;

    if updated.is_empty() {
        return Err(ErrorKind::NotFound
            .with_message("No users were updated")
            .with_resource("user"));
    }

    tracing::info!(target: TRACING_TARGET, updated = updated.len(), "target quota updated");

    Ok((StatusCode::OK, Json(updated.into_iter().collect())))
}

fn bulk_update_target_quota_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Bulk update target quota")
        .description("Returns the updated `{ id, targetquota }` pairs.")
        .response::<200, Json<Envelope<TargetQuotas>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Updates the allowed columns of one activity.
#[tracing::instrument(skip_all)]
async fn update_activity(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<UpdateActivityRequest>,
) -> Result<(StatusCode, Json<Envelope<Activity>>)> {
    let (Some(activity_id), changes) = request.into_parts() else {
        return Err(ErrorKind::BadRequest.with_message("Missing activity id"));
    };

    if changes.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("No fields to update")
            .with_resource("activity"));
    }

    let mut conn = pg_client.get_connection().await?;
    let Some(activity) = conn.update_activity(activity_id, changes).await? else {
        return Err(ErrorKind::NotFound
            .with_message("Activity not found")
            .with_resource("activity"));
    };

    tracing::info!(target: TRACING_TARGET, activity_id, "activity updated");

    Ok((StatusCode::OK, Json(Envelope::new(activity.into()))))
}

fn update_activity_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update activity")
        .description(
            "Writes only the recognized columns present in the body and stamps \
             `updated_at`. Other keys are ignored.",
        )
        .response::<200, Json<Envelope<Activity>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Returns routes for activity management.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/activity/bulk-update-target-quota",
            post_with(bulk_update_target_quota, bulk_update_target_quota_docs),
        )
        .api_route("/activity/update", post_with(update_activity, update_activity_docs))
        .with_path_items(|item| item.tag("Activities"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{
        connect_test_database, create_test_server_with_client, create_test_server_with_router,
    };

    #[tokio::test]
    async fn unknown_fields_alone_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .post("/activity/update")
            .json(&json!({ "id": 1, "hacked": "x" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "No fields to update");
        Ok(())
    }

    #[tokio::test]
    async fn missing_id_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .post("/activity/update")
            .json(&json!({ "remarks": "called" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["resource"], "request");
        Ok(())
    }

    #[tokio::test]
    async fn quota_update_validates_body() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let bodies = [
            json!({ "ids": [], "targetquota": "100000" }),
            json!({ "ids": ["4"], "targetquota": " " }),
            json!({ "ids": ["four"], "targetquota": "100000" }),
        ];

        for body in bodies {
            server
                .post("/activity/bulk-update-target-quota")
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore] // Requires a disposable Postgres database in POSTGRES_URL
    async fn unknown_rows_are_not_found() -> anyhow::Result<()> {
        let server = create_test_server_with_client(routes, connect_test_database().await?)?;

        let response = server
            .post("/activity/update")
            .json(&json!({ "id": i64::MAX, "remarks": "called" }))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["error"], "Activity not found");

        let response = server
            .post("/activity/bulk-update-target-quota")
            .json(&json!({ "ids": [i64::MAX], "targetquota": "100000" }))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["resource"], "user");
        Ok(())
    }
}
