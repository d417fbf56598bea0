use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::activities;

/// A sales activity log entry.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Activity {
    pub id: i64,
    pub referenceid: String,
    pub tsm: String,
    pub manager: String,
    pub company_name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub email_address: String,
    pub address: String,
    pub type_client: String,
    pub type_activity: String,
    pub callstatus: String,
    pub wrapup: String,
    pub remarks: String,
    pub quotation_amount: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Editable activity columns.
///
/// Only `Some` fields are written. `updated_at` is set by the repository.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateActivity {
    pub referenceid: Option<String>,
    pub tsm: Option<String>,
    pub manager: Option<String>,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub contact_number: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub type_client: Option<String>,
    pub type_activity: Option<String>,
    pub callstatus: Option<String>,
    pub wrapup: Option<String>,
    pub remarks: Option<String>,
    pub quotation_amount: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl UpdateActivity {
    /// Returns whether no editable column is set.
    pub fn is_empty(&self) -> bool {
        *self
            == Self {
                updated_at: self.updated_at,
                ..Self::default()
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_alone_is_empty() {
        let update = UpdateActivity {
            updated_at: Some(Timestamp::from(jiff::Timestamp::UNIX_EPOCH)),
            ..Default::default()
        };
        assert!(update.is_empty());

        let update = UpdateActivity {
            remarks: Some("called back".to_owned()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
