use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Ownership column rewritten by a bulk account transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum TransferTarget {
    /// Territory sales associate, stored in `referenceid`.
    #[serde(rename = "TSA")]
    #[strum(serialize = "TSA")]
    Tsa,
    /// Territory sales manager, stored in `tsm`.
    #[serde(rename = "TSM")]
    #[strum(serialize = "TSM")]
    Tsm,
    /// Stored in `manager`.
    Manager,
}

impl TransferTarget {
    /// Returns the accounts column this target writes to.
    pub fn column_name(self) -> &'static str {
        match self {
            TransferTarget::Tsa => "referenceid",
            TransferTarget::Tsm => "tsm",
            TransferTarget::Manager => "manager",
        }
    }
}
