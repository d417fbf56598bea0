//! Taskflow account bulk operations.
//!
//! Every bulk route validates its body before a connection is taken from the
//! pool, so malformed requests are rejected without touching the database.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use itportal_postgres::PgClient;
use itportal_postgres::query::AccountRepository;

use crate::extract::{Json, Query, ValidateJson};
use crate::handler::request::{
    BulkApproveTransfer, BulkTransfer, BulkUpdateStatus, BulkUpdateType, ListAccountsQuery,
    RecordId, UpdateReferenceNumbers,
};
use crate::handler::response::{Account, Accounts, Envelope, ErrorResponse};
use crate::handler::Result;
use crate::service::{BulkReferenceAssigner, ServiceState};

const TRACING_TARGET: &str = "itportal_server::handler::accounts";

/// Reassigns accounts to a new TSA, TSM or manager.
#[tracing::instrument(skip_all, fields(accounts = request.user_ids.len(), transfer_type = %request.target))]
async fn bulk_transfer(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<BulkTransfer>,
) -> Result<(StatusCode, Json<Envelope<Accounts>>)> {
    let target = request.transfer_target()?;
    let account_ids = request.account_ids();

    let mut conn = pg_client.get_connection().await?;
    let accounts = conn
        .bulk_transfer_accounts(&account_ids, target, request.target_id.trim())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        column = target.column_name(),
        updated = accounts.len(),
        "accounts transferred"
    );

    Ok((StatusCode::OK, Json(accounts.into_iter().collect())))
}

fn bulk_transfer_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Bulk transfer accounts")
        .description(
            "Sets `referenceid` (TSA), `tsm` (TSM) or `manager` (Manager) to `targetId` \
             on every listed account. Succeeds with an empty list when nothing matches.",
        )
        .response::<200, Json<Envelope<Accounts>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Approves pending transfers, optionally handing ownership to `transfer_to`.
#[tracing::instrument(skip_all, fields(accounts = request.user_ids.len()))]
async fn bulk_approve_transfer(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<BulkApproveTransfer>,
) -> Result<(StatusCode, Json<Envelope<Accounts>>)> {
    let account_ids = request.account_ids();

    let mut conn = pg_client.get_connection().await?;
    let accounts = conn
        .bulk_approve_transfer(
            &account_ids,
            request.status.trim(),
            request.update_reference_id_from_transfer_to,
        )
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        updated = accounts.len(),
        reassigned = request.update_reference_id_from_transfer_to,
        "transfers approved"
    );

    Ok((StatusCode::OK, Json(accounts.into_iter().collect())))
}

fn bulk_approve_transfer_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Bulk approve transfers")
        .description(
            "Sets `status` on every listed account. With `updateReferenceIdFromTransferTo` \
             the same statement also copies `transfer_to` into `referenceid`.",
        )
        .response::<200, Json<Envelope<Accounts>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Gives each listed account a unique reference number unless it has one.
#[tracing::instrument(skip_all, fields(updates = request.updates.len()))]
async fn update_reference_numbers(
    State(pg_client): State<PgClient>,
    State(assigner): State<BulkReferenceAssigner>,
    Json(request): Json<UpdateReferenceNumbers>,
) -> Result<(StatusCode, Json<Envelope<Accounts>>)> {
    if request.updates.is_empty() {
        return Ok((StatusCode::OK, Json(Envelope::new(Vec::new()))));
    }

    let requests = request.into_requests();

    let mut conn = pg_client.get_connection().await?;
    let accounts = assigner.assign_all(&mut **conn, requests).await?;

    tracing::info!(
        target: TRACING_TARGET,
        returned = accounts.len(),
        "reference numbers assigned"
    );

    Ok((StatusCode::OK, Json(accounts.into_iter().collect())))
}

fn update_reference_numbers_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Assign reference numbers")
        .description(
            "Processes `updates` in order. Accounts that already have a reference number \
             are returned unchanged. Others receive the proposed number, or a generated \
             `REF-NNNNNN` one, retried until no other account holds it. Accounts handled \
             before a failure keep their numbers.",
        )
        .response::<200, Json<Envelope<Accounts>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

#[tracing::instrument(skip_all, fields(accounts = request.user_ids.len()))]
async fn bulk_update_status(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<BulkUpdateStatus>,
) -> Result<(StatusCode, Json<Envelope<Accounts>>)> {
    let account_ids = RecordId::collect(&request.user_ids);

    let mut conn = pg_client.get_connection().await?;
    let accounts = conn
        .bulk_update_account_status(&account_ids, request.status.trim())
        .await?;

    tracing::info!(target: TRACING_TARGET, updated = accounts.len(), "account status updated");

    Ok((StatusCode::OK, Json(accounts.into_iter().collect())))
}

fn bulk_update_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Bulk update account status")
        .response::<200, Json<Envelope<Accounts>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

#[tracing::instrument(skip_all, fields(accounts = request.user_ids.len()))]
async fn bulk_update_type(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<BulkUpdateType>,
) -> Result<(StatusCode, Json<Envelope<Accounts>>)> {
    let account_ids = RecordId::collect(&request.user_ids);

    let mut conn = pg_client.get_connection().await?;
    let accounts = conn
        .bulk_update_account_type(&account_ids, request.typeclient.trim())
        .await?;

    tracing::info!(target: TRACING_TARGET, updated = accounts.len(), "account type updated");

    Ok((StatusCode::OK, Json(accounts.into_iter().collect())))
}

fn bulk_update_type_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Bulk update account type")
        .description("Sets `type_client` on every listed account.")
        .response::<200, Json<Envelope<Accounts>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

#[tracing::instrument(skip_all)]
async fn list_accounts(
    State(pg_client): State<PgClient>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<(StatusCode, Json<Envelope<Accounts>>)> {
    validator::Validate::validate(&query)?;

    let mut conn = pg_client.get_connection().await?;
    let accounts = conn
        .list_accounts(query.filter(), query.pagination())
        .await?;

    tracing::debug!(target: TRACING_TARGET, returned = accounts.len(), "accounts listed");

    let accounts: Accounts = accounts.into_iter().map(Account::from).collect();
    Ok((StatusCode::OK, Json(Envelope::new(accounts))))
}

fn list_accounts_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List accounts")
        .description("Newest first, optionally filtered by owner and status.")
        .response::<200, Json<Envelope<Accounts>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Returns routes for taskflow account management.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/taskflow/accounts", get_with(list_accounts, list_accounts_docs))
        .api_route(
            "/taskflow/accounts/BulkTransfer",
            put_with(bulk_transfer, bulk_transfer_docs),
        )
        .api_route(
            "/taskflow/accounts/BulkApproveTransfer",
            put_with(bulk_approve_transfer, bulk_approve_transfer_docs),
        )
        .api_route(
            "/taskflow/accounts/UpdateReferenceNumber",
            put_with(update_reference_numbers, update_reference_numbers_docs),
        )
        .api_route(
            "/taskflow/accounts/BulkUpdateStatus",
            put_with(bulk_update_status, bulk_update_status_docs),
        )
        .api_route(
            "/taskflow/accounts/BulkUpdateType",
            put_with(bulk_update_type, bulk_update_type_docs),
        )
        .with_path_items(|item| item.tag("Taskflow Accounts"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn bulk_transfer_rejects_invalid_type() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .put("/taskflow/accounts/BulkTransfer")
            .json(&json!({ "userIds": ["1", "2"], "type": "Director", "targetId": "AGENT-7" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["name"], "bad_request");
        assert!(body["error"].as_str().is_some_and(|e| e.contains("TSA, TSM or Manager")));
        Ok(())
    }

    #[tokio::test]
    async fn bulk_transfer_requires_ids_and_target() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let bodies = [
            json!({ "type": "TSM", "targetId": "TSM-1" }),
            json!({ "userIds": [], "type": "TSM", "targetId": "TSM-1" }),
            json!({ "userIds": [1], "type": "TSM", "targetId": "  " }),
            json!({ "userIds": "1", "type": "TSM", "targetId": "TSM-1" }),
        ];

        for body in bodies {
            let response = server.put("/taskflow/accounts/BulkTransfer").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }

        Ok(())
    }

    #[tokio::test]
    async fn bulk_transfer_reports_database_failure() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .put("/taskflow/accounts/BulkTransfer")
            .json(&json!({ "userIds": [1], "type": "TSM", "targetId": "TSM-1" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["resource"], "database");
        Ok(())
    }

    #[tokio::test]
    async fn bulk_approve_requires_status() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .put("/taskflow/accounts/BulkApproveTransfer")
            .json(&json!({ "userIds": [3], "updateReferenceIdFromTransferTo": true }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn reference_updates_must_be_an_array() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        for body in [json!({}), json!({ "updates": "REF-1" }), json!({ "updates": null })] {
            let response = server
                .put("/taskflow/accounts/UpdateReferenceNumber")
                .json(&body)
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }

        Ok(())
    }

    #[tokio::test]
    async fn empty_reference_batch_needs_no_database() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .put("/taskflow/accounts/UpdateReferenceNumber")
            .json(&json!({ "updates": [] }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "success": true, "data": [] }));
        Ok(())
    }

    #[tokio::test]
    async fn bulk_status_and_type_validate_values() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .put("/taskflow/accounts/BulkUpdateStatus")
            .json(&json!({ "userIds": [1], "status": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .put("/taskflow/accounts/BulkUpdateType")
            .json(&json!({ "userIds": [], "typeclient": "Top 50" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn list_rejects_bad_paging() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        server
            .get("/taskflow/accounts")
            .add_query_param("limit", 0)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/taskflow/accounts")
            .add_query_param("offset", "many")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        Ok(())
    }
}
