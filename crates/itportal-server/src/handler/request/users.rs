//! User request types.

use itportal_postgres::model::NewUser;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

fn default_status() -> String {
    "Active".to_owned()
}

/// Creates a staff user.
///
/// `targetquota`, `manager` and `tsm` are kept only for the Sales department.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate, JsonSchema)]
pub struct CreateUser {
    #[validate(custom(function = "not_blank"))]
    pub firstname: String,
    #[validate(custom(function = "not_blank"))]
    pub lastname: String,
    #[validate(email)]
    pub email: String,
    /// Plain-text password, hashed before storage.
    #[validate(length(min = 8, max = 256))]
    pub password: String,
    #[validate(custom(function = "not_blank"))]
    pub role: String,
    #[serde(default)]
    pub position: String,
    #[validate(custom(function = "not_blank"))]
    pub department: String,
    #[serde(default = "default_status")]
    pub status: String,
    /// Agent reference code.
    #[serde(default)]
    pub referenceid: String,
    #[serde(default)]
    pub targetquota: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub tsm: Option<String>,
}

impl CreateUser {
    /// Builds the insert model with an already hashed password.
    pub fn into_model(self, password_hash: String) -> NewUser {
        NewUser {
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            password_hash,
            role: self.role,
            position: self.position,
            department: self.department,
            status: self.status,
            referenceid: self.referenceid,
            targetquota: self.targetquota,
            manager: self.manager,
            tsm: self.tsm,
        }
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_active() -> anyhow::Result<()> {
        let request: CreateUser = serde_json::from_str(
            r#"{"firstname":"Ana","lastname":"Cruz","email":"ana@example.com",
                "password":"correct horse","role":"Staff","department":"IT",
                "targetquota":"100"}"#,
        )?;

        request.validate()?;
        let user = request.into_model("$argon2id$hash".to_owned());
        assert_eq!(user.status, "Active");
        assert_eq!(user.targetquota, None);
        Ok(())
    }

    #[test]
    fn short_password_is_rejected() -> anyhow::Result<()> {
        let request: CreateUser = serde_json::from_str(
            r#"{"firstname":"Ana","lastname":"Cruz","email":"ana@example.com",
                "password":"short","role":"Staff","department":"Sales"}"#,
        )?;

        assert!(request.validate().is_err());
        Ok(())
    }
}
