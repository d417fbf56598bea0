use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Accounts table constraints.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AccountConstraints {
    /// Partial unique index over non-blank reference codes.
    #[strum(serialize = "accounts_reference_number_unique_idx")]
    ReferenceNumberUnique,

    #[strum(serialize = "accounts_updated_after_created")]
    UpdatedAfterCreated,
}

impl AccountConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AccountConstraints::ReferenceNumberUnique => ConstraintCategory::Uniqueness,
            AccountConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }
}

impl From<AccountConstraints> for String {
    #[inline]
    fn from(val: AccountConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for AccountConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
