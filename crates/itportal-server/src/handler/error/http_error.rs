//! HTTP error type returned by every handler.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Error returned by request handlers and extractors.
///
/// Built from an [`ErrorKind`] and rendered as the failure envelope. The
/// message, when set, replaces the kind's default message.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches diagnostic context.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Sets the message reported in the `error` field.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Names the resource the error is about, e.g. `account`.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Converts borrowed parts into owned ones.
    pub fn into_static(self) -> Error<'static> {
        Error {
            kind: self.kind,
            context: self.context.map(|c| Cow::Owned(c.into_owned())),
            message: self.message.map(|m| Cow::Owned(m.into_owned())),
            resource: self.resource.map(|r| Cow::Owned(r.into_owned())),
        }
    }

    /// Builds the response body for this error.
    pub fn to_response(&self) -> ErrorResponse<'_> {
        let mut response: ErrorResponse<'_> = self.kind.response();

        if let Some(message) = self.message.as_deref() {
            response = response.with_message(message);
        }

        if let Some(resource) = self.resource.as_deref() {
            response = response.with_resource(resource);
        }

        if let Some(context) = self.context.as_deref() {
            response = response.with_context(context);
        }

        response
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("name", &response.name)
            .field("status", &response.status);

        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }

        if let Some(ref resource) = self.resource {
            debug_struct.field("resource", resource);
        }

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.error);

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {}]", resource)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl aide::OperationOutput for Error<'_> {
    type Inner = ();
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type for handlers.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every failure a handler can report, grouped by status code.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400, the request failed validation or could not be parsed.
    BadRequest,
    /// 404, nothing matched or nothing was changed.
    NotFound,
    /// 409, a uniqueness rule was violated.
    Conflict,
    /// 500, unexpected or database failure.
    #[default]
    InternalServerError,
    /// 503, a dependency is unavailable.
    ServiceUnavailable,
}

impl ErrorKind {
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the default response for this kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_error_is_internal() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("No activity found with the given id")
            .with_resource("activity")
            .with_context("id: 7");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("No activity found with the given id"));
        assert_eq!(error.resource(), Some("activity"));
        assert_eq!(error.context(), Some("id: 7"));
    }

    #[test]
    fn message_replaces_default() {
        let error = ErrorKind::BadRequest.with_message("No fields to update");
        let response = error.to_response();
        assert_eq!(response.error, "No fields to update");
        assert_eq!(response.name, "bad_request");
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn display_includes_parts() {
        let error = ErrorKind::Conflict
            .with_message("Email already in use")
            .with_resource("user")
            .with_context("ana@example.com");

        let display = error.to_string();
        assert!(display.contains("conflict"));
        assert!(display.contains("409"));
        assert!(display.contains("Email already in use"));
        assert!(display.contains("user"));
    }

    #[test]
    fn into_static_owns_parts() {
        let resource = String::from("progress");
        let error = ErrorKind::NotFound.with_resource(resource.as_str()).into_static();
        drop(resource);
        assert_eq!(error.resource(), Some("progress"));
    }

    #[test]
    fn every_kind_maps_to_an_error_status() {
        let kinds = [
            ErrorKind::BadRequest,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::InternalServerError,
            ErrorKind::ServiceUnavailable,
        ];

        for kind in kinds {
            let response = kind.response();
            assert!(!response.name.is_empty());
            assert!(response.status.as_u16() >= 400);
        }
    }
}
