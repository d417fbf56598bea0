//! Staff user model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::users;

/// Department whose members carry quota and reporting-line fields.
pub const SALES_DEPARTMENT: &str = "Sales";

/// A staff member of the portal.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: String,
    pub position: String,
    pub department: String,
    /// "Active", "Resigned", "Terminated" and so on.
    pub status: String,
    pub referenceid: String,
    pub targetquota: Option<String>,
    pub manager: Option<String>,
    pub tsm: Option<String>,
    pub login_attempts: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Returns whether a lockout is still in effect.
    pub fn is_locked(&self) -> bool {
        self.locked_until
            .is_some_and(|until| jiff::Timestamp::from(until) > jiff::Timestamp::now())
    }
}

/// Data for creating a user.
#[derive(Debug, Clone, Default, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub position: String,
    pub department: String,
    pub status: String,
    pub referenceid: String,
    pub targetquota: Option<String>,
    pub manager: Option<String>,
    pub tsm: Option<String>,
}

impl NewUser {
    /// Clears the Sales-only fields unless the user belongs to Sales.
    pub fn normalize(mut self) -> Self {
        self.firstname = self.firstname.trim().to_owned();
        self.lastname = self.lastname.trim().to_owned();
        self.email = self.email.trim().to_lowercase();

        if self.department != SALES_DEPARTMENT {
            self.targetquota = None;
            self.manager = None;
            self.tsm = None;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(department: &str) -> NewUser {
        NewUser {
            firstname: " Ana ".to_owned(),
            lastname: "Cruz".to_owned(),
            email: " Ana@Example.COM ".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            role: "Territory Sales".to_owned(),
            department: department.to_owned(),
            status: "Active".to_owned(),
            targetquota: Some("500000".to_owned()),
            manager: Some("MGR-1".to_owned()),
            tsm: Some("TSM-1".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn sales_fields_are_kept_for_sales() {
        let user = new_user("Sales").normalize();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.firstname, "Ana");
        assert_eq!(user.targetquota.as_deref(), Some("500000"));
        assert_eq!(user.tsm.as_deref(), Some("TSM-1"));
    }

    #[test]
    fn sales_fields_are_dropped_elsewhere() {
        let user = new_user("IT").normalize();
        assert_eq!(user.targetquota, None);
        assert_eq!(user.manager, None);
        assert_eq!(user.tsm, None);
    }
}
