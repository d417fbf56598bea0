//! User constraint violation error handlers.

use itportal_postgres::types::UserConstraints;

use crate::handler::{Error, ErrorKind};

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        let error = match c {
            UserConstraints::EmailNotEmpty => {
                ErrorKind::BadRequest.with_message("Email cannot be empty")
            }
            UserConstraints::PasswordHashNotEmpty => {
                ErrorKind::BadRequest.with_message("Password cannot be empty")
            }
            UserConstraints::LoginAttemptsMin | UserConstraints::UpdatedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("user")
    }
}
