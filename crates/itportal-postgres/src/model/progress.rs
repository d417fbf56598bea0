use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::progress;

/// A progress entry tracked against an account.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Progress {
    pub id: i64,
    pub referenceid: String,
    pub company_name: String,
    pub contact_person: String,
    pub activitystatus: String,
    pub remarks: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
