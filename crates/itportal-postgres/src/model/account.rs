//! Taskflow customer account model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::accounts;

/// A customer account owned by a sales agent.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    pub id: i64,
    /// Owning territory sales associate.
    pub referenceid: String,
    /// Territory sales manager.
    pub tsm: String,
    pub manager: String,
    pub company_name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub email_address: String,
    pub address: String,
    pub type_client: String,
    /// Free text such as "Active", "Endorsed" or "Pending Transfer".
    pub status: String,
    /// Agent a pending transfer will hand the account to.
    pub transfer_to: Option<String>,
    /// Unique once set to a non-blank value.
    pub account_reference_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Returns the reference code if it is set to something other than whitespace.
    pub fn reference_code(&self) -> Option<&str> {
        self.account_reference_number
            .as_deref()
            .filter(|code| !code.trim().is_empty())
    }

    /// Returns whether the account already carries a reference code.
    #[inline]
    pub fn has_reference_code(&self) -> bool {
        self.reference_code().is_some()
    }
}

/// Optional equality filters for listing accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub referenceid: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(code: Option<&str>) -> Account {
        let now = Timestamp::from(jiff::Timestamp::UNIX_EPOCH);
        Account {
            id: 1,
            referenceid: "AGENT-1".to_owned(),
            tsm: String::new(),
            manager: String::new(),
            company_name: "Acme".to_owned(),
            contact_person: String::new(),
            contact_number: String::new(),
            email_address: String::new(),
            address: String::new(),
            type_client: String::new(),
            status: "Active".to_owned(),
            transfer_to: None,
            account_reference_number: code.map(str::to_owned),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn blank_reference_code_counts_as_unset() {
        assert!(!account(None).has_reference_code());
        assert!(!account(Some("")).has_reference_code());
        assert!(!account(Some("   ")).has_reference_code());
        assert_eq!(account(Some("REF-123456")).reference_code(), Some("REF-123456"));
    }
}
