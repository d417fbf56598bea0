//! Inquiry request types.

use itportal_postgres::model::UpdateInquiry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::RecordId;

/// Partial update of an inquiry. Unknown keys are ignored.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct UpdateInquiryRequest {
    #[validate(required)]
    pub id: Option<RecordId>,

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
}

impl UpdateInquiryRequest {
    pub fn into_parts(self) -> (Option<i64>, UpdateInquiry) {
        let changes = UpdateInquiry {
            referenceid: self.referenceid,
            company_name: self.company_name,
            contact_person: self.contact_person,
            contact_number: self.contact_number,
            email_address: self.email_address,
            address: self.address,
            channel: self.channel,
            inquiry: self.inquiry,
            remarks: self.remarks,
            status: self.status,
            updated_at: None,
        };

        (self.id.map(RecordId::get), changes)
    }
}
