//! Database error to HTTP error conversions.
//!
//! Known constraint violations map to the error defined for that constraint
//! in the sibling `pg_*` modules. Any other query failure is reported as a
//! 500 whose message is the driver message.

use itportal_postgres::PgError;
use itportal_postgres::types::ConstraintViolation;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "itportal_server::postgres_constraints";

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Account(c) => c.into(),
            ConstraintViolation::User(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(ref config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError
                    .with_message("Database is misconfigured")
                    .with_resource("database")
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::InternalServerError
                    .with_message("Database connection unavailable")
                    .with_context("Timed out waiting for a pooled connection")
                    .with_resource("database")
            }
            PgError::Connection(ref connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError
                    .with_message("Database connection unavailable")
                    .with_context(connection_error.to_string())
                    .with_resource("database")
            }
            PgError::Migration(ref migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.with_resource("database")
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );

                let kind = if error.is_unique_violation() {
                    ErrorKind::Conflict
                } else {
                    ErrorKind::InternalServerError
                };

                kind.with_message(query_error.to_string())
                    .with_resource("database")
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError
                    .with_message(unexpected_error)
                    .with_resource("database")
            }
        }
    }
}

impl From<itportal_postgres::DieselError> for Error<'static> {
    fn from(error: itportal_postgres::DieselError) -> Self {
        PgError::from(error).into()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use itportal_postgres::DieselError;
    use itportal_postgres::types::AccountConstraints;

    use super::*;
    use crate::handler::error::tests::database_error;

    #[test]
    fn driver_message_is_surfaced() {
        let error = Error::from(database_error(
            diesel::result::DatabaseErrorKind::Unknown,
            "relation \"progress\" does not exist",
            None,
        ));

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), Some("relation \"progress\" does not exist"));
    }

    #[test]
    fn reference_number_violation_is_conflict() {
        let error = Error::from(database_error(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint",
            Some("accounts_reference_number_unique_idx"),
        ));

        assert_eq!(error.kind().status_code(), StatusCode::CONFLICT);
        assert_eq!(
            Error::from(ConstraintViolation::Account(
                AccountConstraints::ReferenceNumberUnique
            ))
            .kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn unknown_unique_violation_is_conflict() {
        let error = Error::from(database_error(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"other_idx\"",
            Some("other_idx"),
        ));

        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn diesel_errors_convert() {
        let error = Error::from(DieselError::NotFound);
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), Some("Record not found"));
    }
}
