use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Users table constraints.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum UserConstraints {
    #[strum(serialize = "users_email_not_empty")]
    EmailNotEmpty,
    #[strum(serialize = "users_password_hash_not_empty")]
    PasswordHashNotEmpty,
    #[strum(serialize = "users_login_attempts_min")]
    LoginAttemptsMin,

    #[strum(serialize = "users_updated_after_created")]
    UpdatedAfterCreated,
}

impl UserConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            UserConstraints::EmailNotEmpty
            | UserConstraints::PasswordHashNotEmpty
            | UserConstraints::LoginAttemptsMin => ConstraintCategory::Validation,
            UserConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }
}

impl From<UserConstraints> for String {
    #[inline]
    fn from(val: UserConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for UserConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
