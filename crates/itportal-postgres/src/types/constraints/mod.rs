//! Named database constraints, grouped by table.

mod accounts;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::accounts::AccountConstraints;
pub use self::users::UserConstraints;

/// Any named constraint the schema defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Account(AccountConstraints),
    User(UserConstraints),
}

/// Broad classes of constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Format, length or range checks.
    Validation,
    /// Timestamp ordering.
    Chronological,
    /// Unique indexes.
    Uniqueness,
}

impl ConstraintViolation {
    /// Resolves a constraint name reported by the database.
    ///
    /// ```
    /// use itportal_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("accounts_reference_number_unique_idx").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        match constraint.split('_').next()? {
            "accounts" => AccountConstraints::new(constraint).map(Self::Account),
            "users" => UserConstraints::new(constraint).map(Self::User),
            _ => None,
        }
    }

    /// Returns the table the constraint is declared on.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Account(_) => "accounts",
            ConstraintViolation::User(_) => "users",
        }
    }

    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Account(c) => c.categorize(),
            ConstraintViolation::User(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Account(c) => write!(f, "{c}"),
            ConstraintViolation::User(c) => write!(f, "{c}"),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_names_resolve_by_table() {
        assert_eq!(
            ConstraintViolation::new("accounts_reference_number_unique_idx"),
            Some(ConstraintViolation::Account(
                AccountConstraints::ReferenceNumberUnique
            ))
        );
        assert_eq!(
            ConstraintViolation::new("users_login_attempts_min"),
            Some(ConstraintViolation::User(UserConstraints::LoginAttemptsMin))
        );
        assert_eq!(ConstraintViolation::new("accounts_unknown"), None);
        assert_eq!(ConstraintViolation::new("progress_pkey"), None);
    }

    #[test]
    fn categories_and_tables() {
        let violation = ConstraintViolation::Account(AccountConstraints::ReferenceNumberUnique);
        assert_eq!(violation.table_name(), "accounts");
        assert_eq!(violation.constraint_category(), ConstraintCategory::Uniqueness);

        let violation = ConstraintViolation::User(UserConstraints::UpdatedAfterCreated);
        assert_eq!(violation.table_name(), "users");
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Chronological
        );
    }

    #[test]
    fn serde_uses_constraint_name() -> anyhow::Result<()> {
        let violation = ConstraintViolation::User(UserConstraints::EmailNotEmpty);
        let json = serde_json::to_string(&violation)?;
        assert_eq!(json, "\"users_email_not_empty\"");
        Ok(())
    }
}
