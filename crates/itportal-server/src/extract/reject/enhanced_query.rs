use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "itportal_server::extract::query";

/// [`axum::extract::Query`] with rejections that name the offending parameter.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AxumQuery::<T>::from_request_parts(parts, state)
            .await
            .map(|AxumQuery(query)| Self(query))
            .map_err(query_error)
    }
}

fn query_error(rejection: QueryRejection) -> Error<'static> {
    tracing::debug!(
        target: TRACING_TARGET,
        error = %rejection,
        "query string rejected"
    );

    let QueryRejection::FailedToDeserializeQueryString(err) = rejection else {
        return ErrorKind::BadRequest.with_message("Invalid query parameters");
    };

    let message = err.body_text();
    let field = field_name(&message).unwrap_or("unknown");

    if message.contains("missing field") {
        ErrorKind::BadRequest
            .with_message("Missing required query parameter")
            .with_context(format!("Parameter '{field}' is required"))
    } else if message.contains("duplicate field") {
        ErrorKind::BadRequest
            .with_message("Duplicate query parameter")
            .with_context(format!("Parameter '{field}' was provided more than once"))
    } else {
        ErrorKind::BadRequest
            .with_message("Invalid query parameters")
            .with_context(message)
    }
}

/// Pulls the first backtick-quoted name out of a serde error message.
fn field_name(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let end = message[start..].find('`')?;
    Some(&message[start..start + end])
}

impl<T> aide::OperationInput for Query<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumQuery::<T>::operation_input(ctx, operation);
    }
}
