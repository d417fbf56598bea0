use itportal_postgres::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
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

impl From<model::Inquiry> for Inquiry {
    fn from(inquiry: model::Inquiry) -> Self {
        Self {
            id: inquiry.id,
            referenceid: inquiry.referenceid,
            company_name: inquiry.company_name,
            contact_person: inquiry.contact_person,
            contact_number: inquiry.contact_number,
            email_address: inquiry.email_address,
            address: inquiry.address,
            channel: inquiry.channel,
            inquiry: inquiry.inquiry,
            remarks: inquiry.remarks,
            status: inquiry.status,
            created_at: inquiry.created_at.into(),
            updated_at: inquiry.updated_at.into(),
        }
    }
}
