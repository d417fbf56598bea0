//! Inquiry handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use itportal_postgres::PgClient;
use itportal_postgres::query::InquiryRepository;

use crate::extract::{Json, ValidateJson};
use crate::handler::request::UpdateInquiryRequest;
use crate::handler::response::{Envelope, ErrorResponse, Inquiry};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

const TRACING_TARGET: &str = "itportal_server::handler::inquiries";

#[tracing::instrument(skip_all)]
async fn update_inquiry(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<UpdateInquiryRequest>,
) -> Result<(StatusCode, Json<Envelope<Inquiry>>)> {
    let (Some(inquiry_id), changes) = request.into_parts() else {
        return Err(ErrorKind::BadRequest.with_message("Missing inquiry id"));
    };

    if changes.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("No fields to update")
            .with_resource("inquiry"));
    }

    let mut conn = pg_client.get_connection().await?;
    let Some(inquiry) = conn.update_inquiry(inquiry_id, changes).await? else {
        return Err(ErrorKind::NotFound
            .with_message("Inquiry not found")
            .with_resource("inquiry"));
    };

    tracing::info!(target: TRACING_TARGET, inquiry_id, "inquiry updated");

    Ok((StatusCode::OK, Json(Envelope::new(inquiry.into()))))
}

fn update_inquiry_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update inquiry")
        .description("Writes only the recognized columns present in the body.")
        .response::<200, Json<Envelope<Inquiry>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/inquiries/update", post_with(update_inquiry, update_inquiry_docs))
        .with_path_items(|item| item.tag("Inquiries"))
}
