use itportal_postgres::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A staff user. The password hash is never returned.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: String,
    pub position: String,
    pub department: String,
    pub status: String,
    pub referenceid: String,
    pub targetquota: Option<String>,
    pub manager: Option<String>,
    pub tsm: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<model::User> for User {
    fn from(user: model::User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            role: user.role,
            position: user.position,
            department: user.department,
            status: user.status,
            referenceid: user.referenceid,
            targetquota: user.targetquota,
            manager: user.manager,
            tsm: user.tsm,
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        }
    }
}
