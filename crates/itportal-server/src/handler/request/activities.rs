//! Activity request types.

use itportal_postgres::model::UpdateActivity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{RecordId, not_blank};

/// Sets the sales target quota on a set of users.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct BulkUpdateTargetQuota {
    /// User ids.
    #[validate(length(min = 1))]
    pub ids: Vec<RecordId>,
    #[validate(custom(function = "not_blank"))]
    pub targetquota: String,
}

impl BulkUpdateTargetQuota {
    pub fn user_ids(&self) -> Vec<i64> {
        RecordId::collect(&self.ids)
    }
}

/// Partial update of an activity.
///
/// Only the listed columns can be changed. Other keys in the body are ignored.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct UpdateActivityRequest {
    #[validate(required)]
    pub id: Option<RecordId>,

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
}

impl UpdateActivityRequest {
    /// Splits the request into the row id and the column changes.
    pub fn into_parts(self) -> (Option<i64>, UpdateActivity) {
        let changes = UpdateActivity {
            referenceid: self.referenceid,
            tsm: self.tsm,
            manager: self.manager,
            company_name: self.company_name,
            contact_person: self.contact_person,
            contact_number: self.contact_number,
            email_address: self.email_address,
            address: self.address,
            type_client: self.type_client,
            type_activity: self.type_activity,
            callstatus: self.callstatus,
            wrapup: self.wrapup,
            remarks: self.remarks,
            quotation_amount: self.quotation_amount,
            status: self.status,
            updated_at: None,
        };

        (self.id.map(RecordId::get), changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_ignored() -> anyhow::Result<()> {
        let request: UpdateActivityRequest =
            serde_json::from_str(r#"{"id":1,"hacked":"x","created_at":"yesterday"}"#)?;

        request.validate()?;
        let (id, changes) = request.into_parts();
        assert_eq!(id, Some(1));
        assert!(changes.is_empty());
        Ok(())
    }

    #[test]
    fn allowed_keys_become_changes() -> anyhow::Result<()> {
        let request: UpdateActivityRequest =
            serde_json::from_str(r#"{"id":"8","remarks":"follow up","status":"Done"}"#)?;

        let (_, changes) = request.into_parts();
        assert_eq!(changes.remarks.as_deref(), Some("follow up"));
        assert_eq!(changes.status.as_deref(), Some("Done"));
        assert!(!changes.is_empty());
        Ok(())
    }

    #[test]
    fn id_is_required() -> anyhow::Result<()> {
        let request: UpdateActivityRequest = serde_json::from_str(r#"{"remarks":"x"}"#)?;
        assert!(request.validate().is_err());
        Ok(())
    }
}
