use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

/// Failure envelope.
///
/// Serialized as `{ "success": false, "error": ..., "name": ... }` with
/// optional `resource` and `context`. The status code is carried alongside
/// but never serialized.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: Cow<'a, str>,
    /// Machine-readable error kind, e.g. `bad_request`.
    pub name: Cow<'a, str>,
    /// The resource the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Additional detail about the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,

    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self =
        Self::new("conflict", "Resource state conflict.", StatusCode::CONFLICT);
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "Service unavailable.",
        StatusCode::SERVICE_UNAVAILABLE,
    );

    #[inline]
    pub const fn new(name: &'a str, error: &'a str, status: StatusCode) -> Self {
        Self {
            success: false,
            error: Cow::Borrowed(error),
            name: Cow::Borrowed(name),
            resource: None,
            context: None,
            status,
        }
    }

    /// Replaces the error message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.error = message.into();
        self
    }

    /// Sets the resource. An existing resource is kept as a prefix.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Attaches context. Existing context is kept, separated by `; `.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                name = %self.name,
                error = %self.error,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        } else {
            tracing::warn!(
                status = %self.status,
                name = %self.name,
                error = %self.error,
                resource = ?self.resource,
                "HTTP error response"
            );
        }

        (self.status, Json(self)).into_response()
    }
}
