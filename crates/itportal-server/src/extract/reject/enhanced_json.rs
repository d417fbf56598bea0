//! JSON extractor and response wrapper.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "itportal_server::extract::json";

/// Request bodies larger than this are rejected.
pub const MAX_JSON_PAYLOAD_SIZE: usize = 2 * 1024 * 1024;

/// [`axum::Json`] with rejections rendered as the failure envelope.
///
/// Also used as the response wrapper so handlers and docs share one type.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AxumJson(inner) = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(Self::new(inner))
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(
            target: TRACING_TARGET,
            error = %rejection,
            "JSON body rejected"
        );

        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_context(truncate(&err.body_text())),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(truncate(&err.body_text())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Invalid content type")
                .with_context("Expected Content-Type: application/json"),
            JsonRejection::BytesRejection(err) => {
                let message = err.body_text();
                if message.contains("length limit") {
                    ErrorKind::BadRequest
                        .with_message("Request body too large")
                        .with_context(format!("Limit is {MAX_JSON_PAYLOAD_SIZE} bytes"))
                } else {
                    ErrorKind::BadRequest
                        .with_message("Failed to read request body")
                        .with_context(truncate(&message))
                }
            }
            other => ErrorKind::InternalServerError
                .with_message("Request processing failed")
                .with_context(truncate(&other.body_text())),
        }
    }
}

/// Keeps the first two lines, at most 200 characters.
fn truncate(message: &str) -> String {
    message
        .lines()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(200)
        .collect()
}

impl<T> aide::OperationInput for Json<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumJson::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_early_responses(ctx, operation)
    }
}

impl<T> aide::OperationOutput for Json<T>
where
    T: schemars::JsonSchema + Serialize,
{
    type Inner = T;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        AxumJson::<T>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_messages_are_truncated() {
        let message = format!("{}\nsecond\nthird", "x".repeat(300));
        let truncated = truncate(&message);
        assert_eq!(truncated.chars().count(), 200);
        assert!(!truncated.contains("third"));
    }
}
