use itportal_postgres::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An account row as stored.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Account {
    pub id: i64,
    /// Owning territory sales associate.
    pub referenceid: String,
    pub tsm: String,
    pub manager: String,
    pub company_name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub email_address: String,
    pub address: String,
    pub type_client: String,
    pub status: String,
    pub transfer_to: Option<String>,
    pub account_reference_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<model::Account> for Account {
    fn from(account: model::Account) -> Self {
        Self {
            id: account.id,
            referenceid: account.referenceid,
            tsm: account.tsm,
            manager: account.manager,
            company_name: account.company_name,
            contact_person: account.contact_person,
            contact_number: account.contact_number,
            email_address: account.email_address,
            address: account.address,
            type_client: account.type_client,
            status: account.status,
            transfer_to: account.transfer_to,
            account_reference_number: account.account_reference_number,
            created_at: account.created_at.into(),
            updated_at: account.updated_at.into(),
        }
    }
}

pub type Accounts = Vec<Account>;
