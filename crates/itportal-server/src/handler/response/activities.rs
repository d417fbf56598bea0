use itportal_postgres::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An activity row after an update.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
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

impl From<model::Activity> for Activity {
    fn from(activity: model::Activity) -> Self {
        Self {
            id: activity.id,
            referenceid: activity.referenceid,
            tsm: activity.tsm,
            manager: activity.manager,
            company_name: activity.company_name,
            contact_person: activity.contact_person,
            contact_number: activity.contact_number,
            email_address: activity.email_address,
            address: activity.address,
            type_client: activity.type_client,
            type_activity: activity.type_activity,
            callstatus: activity.callstatus,
            wrapup: activity.wrapup,
            remarks: activity.remarks,
            quotation_amount: activity.quotation_amount,
            status: activity.status,
            created_at: activity.created_at.into(),
            updated_at: activity.updated_at.into(),
        }
    }
}

/// A user's quota after a bulk quota update.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetQuota {
    pub id: i64,
    pub targetquota: Option<String>,
}

impl From<(i64, Option<String>)> for TargetQuota {
    fn from((id, targetquota): (i64, Option<String>)) -> Self {
        Self { id, targetquota }
    }
}

pub type TargetQuotas = Vec<TargetQuota>;
