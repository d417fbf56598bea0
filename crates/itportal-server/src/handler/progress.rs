//! Progress entry handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use itportal_postgres::PgClient;
use itportal_postgres::query::ProgressRepository;

use crate::extract::{Json, ValidateJson};
use crate::handler::request::DeleteProgress;
use crate::handler::response::{DeletedProgress, ErrorResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

const TRACING_TARGET: &str = "itportal_server::handler::progress";

/// Deletes progress entries by id.
#[tracing::instrument(skip_all, fields(requested = request.ids.len()))]
async fn delete_progress(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<DeleteProgress>,
) -> Result<(StatusCode, Json<DeletedProgress>)> {
    let progress_ids = request.progress_ids();

    let mut conn = pg_client.get_connection().await?;
    let deleted_ids = conn.delete_progress_entries(&progress_ids).await?;

    if deleted_ids.is_empty() {
        return Err(ErrorKind::NotFound
            .with_message("No progress entries were deleted")
            .with_resource("progress"));
    }

    tracing::info!(target: TRACING_TARGET, deleted = deleted_ids.len(), "progress entries deleted");

    Ok((StatusCode::OK, Json(DeletedProgress::new(deleted_ids))))
}

fn delete_progress_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete progress entries")
        .description("Returns the ids that existed and were removed.")
        .response::<200, Json<DeletedProgress>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/progress/delete", post_with(delete_progress, delete_progress_docs))
        .with_path_items(|item| item.tag("Progress"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use diesel::sql_types::BigInt;
    use diesel_async::RunQueryDsl;

    use super::*;
    use crate::handler::test::{
        connect_test_database, create_test_server_with_client, create_test_server_with_router,
    };

    #[derive(diesel::QueryableByName)]
    struct InsertedId {
        #[diesel(sql_type = BigInt)]
        id: i64,
    }

    async fn insert_progress_entries(pg_client: &PgClient, count: i64) -> anyhow::Result<Vec<i64>> {
        let mut conn = pg_client.get_connection().await?;
        let rows: Vec<InsertedId> = diesel::sql_query(
            "INSERT INTO progress (remarks) \
             SELECT 'pending' FROM generate_series(1, $1) \
             RETURNING id",
        )
        .bind::<BigInt, _>(count)
        .load(&mut **conn)
        .await?;

        let mut progress_ids: Vec<i64> = rows.into_iter().map(|row| row.id).collect();
        progress_ids.sort_unstable();
        Ok(progress_ids)
    }

    #[tokio::test]
    async fn empty_ids_are_rejected_before_the_database() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .post("/progress/delete")
            .json(&json!({ "ids": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["resource"], "request");
        Ok(())
    }

    #[tokio::test]
    async fn missing_body_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        server
            .post("/progress/delete")
            .text("ids=1")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    #[ignore] // Requires a disposable Postgres database in POSTGRES_URL
    async fn deletes_matching_entries_then_reports_not_found() -> anyhow::Result<()> {
        let pg_client = connect_test_database().await?;
        let progress_ids = insert_progress_entries(&pg_client, 3).await?;
        let server = create_test_server_with_client(routes, pg_client)?;

        let response = server
            .post("/progress/delete")
            .json(&json!({ "ids": progress_ids }))
            .await;

        response.assert_status_ok();
        let mut deleted = response.json::<DeletedProgress>();
        deleted.deleted_ids.sort_unstable();
        assert!(deleted.success);
        assert_eq!(deleted.deleted_ids, progress_ids);

        let response = server
            .post("/progress/delete")
            .json(&json!({ "ids": progress_ids }))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["resource"], "progress");
        Ok(())
    }

    #[tokio::test]
    #[ignore] // Requires a disposable Postgres database in POSTGRES_URL
    async fn only_existing_ids_are_reported() -> anyhow::Result<()> {
        let pg_client = connect_test_database().await?;
        let progress_ids = insert_progress_entries(&pg_client, 2).await?;
        let server = create_test_server_with_client(routes, pg_client)?;

        let mut requested: Vec<String> = progress_ids.iter().map(i64::to_string).collect();
        requested.push(i64::MAX.to_string());

        let response = server
            .post("/progress/delete")
            .json(&json!({ "ids": requested }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<DeletedProgress>().deleted_ids.len(), 2);
        Ok(())
    }
}
