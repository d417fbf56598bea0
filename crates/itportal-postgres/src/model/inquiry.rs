use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::inquiries;

/// A customer inquiry received through an intake channel.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = inquiries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Inquiry {
    pub id: i64,
    pub referenceid: String,
    pub company_name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub email_address: String,
    pub address: String,
    pub channel: String,
    pub inquiry: String,
    pub remarks: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Editable inquiry columns.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = inquiries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateInquiry {
    pub referenceid: Option<String>,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub contact_number: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub channel: Option<String>,
    pub inquiry: Option<String>,
    pub remarks: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl UpdateInquiry {
    /// Returns whether no editable column is set.
    pub fn is_empty(&self) -> bool {
        *self
            == Self {
                updated_at: self.updated_at,
                ..Self::default()
            }
    }
}
