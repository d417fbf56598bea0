//! Staff user administration.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use itportal_postgres::PgClient;
use itportal_postgres::query::UserRepository;

use crate::extract::{Json, ValidateJson};
use crate::handler::request::CreateUser;
use crate::handler::response::{Envelope, ErrorResponse, User};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState};

const TRACING_TARGET: &str = "itportal_server::handler::users";

/// Creates a user after checking that no active user holds the email.
#[tracing::instrument(skip_all, fields(department = %request.department))]
async fn create_user(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    ValidateJson(request): ValidateJson<CreateUser>,
) -> Result<(StatusCode, Json<Envelope<User>>)> {
    let mut conn = pg_client.get_connection().await?;

    if conn.email_exists_for_active_user(&request.email).await? {
        return Err(ErrorKind::Conflict
            .with_message("Email is already in use by an active user")
            .with_resource("user"));
    }

    let password_hash = password_hasher.hash_password(&request.password)?;
    let user = conn.create_user(request.into_model(password_hash)).await?;

    tracing::info!(target: TRACING_TARGET, user_id = user.id, "user created");

    Ok((StatusCode::CREATED, Json(Envelope::new(user.into()))))
}

fn create_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create user")
        .description(
            "Stores an argon2id hash of `password`. Quota and reporting-line fields are \
             kept only for the Sales department.",
        )
        .response::<201, Json<Envelope<User>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/users", post_with(create_user, create_user_docs))
        .with_path_items(|item| item.tag("Users"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn invalid_users_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .post("/users")
            .json(&json!({
                "firstname": "Ana",
                "lastname": "Cruz",
                "email": "not-an-email",
                "password": "short",
                "role": "Staff",
                "department": "Sales"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error = response.json::<Value>()["error"].as_str().map(str::to_owned);
        assert!(error.as_deref().is_some_and(|e| e.contains("email") && e.contains("password")));
        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        server
            .post("/users")
            .json(&json!({ "email": "ana@example.com", "password": "long enough" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        Ok(())
    }
}
