//! Reference assignment error to HTTP error conversion.

use crate::handler::{Error, ErrorKind};
use crate::service::AssignmentError;

const TRACING_TARGET: &str = "itportal_server::handler::reference";

impl From<AssignmentError> for Error<'static> {
    fn from(error: AssignmentError) -> Self {
        match error {
            AssignmentError::ReferenceAssignmentFailed {
                account_id,
                attempts,
            } => {
                tracing::error!(
                    target: TRACING_TARGET,
                    account_id,
                    attempts,
                    "reference number candidates exhausted"
                );

                ErrorKind::InternalServerError
                    .with_message(error.to_string())
                    .with_context(format!("account id: {account_id}"))
                    .with_resource("account")
            }
            AssignmentError::Database(pg_error) => pg_error.into(),
        }
    }
}
