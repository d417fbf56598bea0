//! Errors raised while wiring up services at startup.
//!
//! Request handlers use [`handler::Error`] instead; this type covers
//! configuration problems and failures talking to backing services before
//! the server starts accepting traffic.
//!
//! [`handler::Error`]: crate::handler::Error

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Boxed, thread-safe error used as an error source.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type for service setup.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Category of a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or missing configuration.
    Config,
    /// A backing service (the database) could not be reached or refused a request.
    External,
    /// Failure inside the server itself.
    Internal,
}

impl ErrorKind {
    /// Returns the kind as a short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::External => "external_service",
            Self::Internal => "internal_service",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service error with a kind, a message and an optional source.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying error.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates an error for a backing service, prefixed with its name.
    #[inline]
    pub fn external(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let message = format!("{}: {}", service.into(), message.into());
        Self::new(ErrorKind::External, message)
    }

    /// Creates an internal error, prefixed with the component name.
    #[inline]
    pub fn internal(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let message = format!("{}: {}", service.into(), message.into());
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<itportal_postgres::PgError> for Error {
    fn from(err: itportal_postgres::PgError) -> Self {
        let kind = match err {
            itportal_postgres::PgError::Config(_) => ErrorKind::Config,
            _ => ErrorKind::External,
        };

        Self::new(kind, format!("postgres: {err}")).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use itportal_postgres::PgError;

    use super::*;

    #[test]
    fn config_error_keeps_message() {
        let error = Error::config("reference prefix cannot be empty");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.message(), "reference prefix cannot be empty");
        assert!(StdError::source(&error).is_none());
    }

    #[test]
    fn internal_error_is_prefixed_and_chained() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = Error::internal("postgres", "Failed to apply migrations").with_source(source);

        assert_eq!(error.kind(), ErrorKind::Internal);
        assert_eq!(
            error.to_string(),
            "internal_service error: postgres: Failed to apply migrations"
        );
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn postgres_config_errors_stay_config_errors() {
        let error = Error::from(PgError::Config("postgres_url cannot be empty".to_owned()));
        assert_eq!(error.kind(), ErrorKind::Config);

        let error = Error::from(PgError::Unexpected("pool closed".into()));
        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.message().starts_with("postgres:"));
    }
}
