//! Account constraint violation error handlers.

use itportal_postgres::types::AccountConstraints;

use crate::handler::{Error, ErrorKind};

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        let error = match c {
            AccountConstraints::ReferenceNumberUnique => ErrorKind::Conflict
                .with_message("Reference number is already assigned to another account"),
            AccountConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("account")
    }
}
