//! Taskflow account request types.

use itportal_postgres::model::AccountFilter;
use itportal_postgres::query::Pagination;
use itportal_postgres::types::TransferTarget;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{RecordId, not_blank, validate_transfer_target};
use crate::handler::{ErrorKind, Result};
use crate::service::ReferenceRequest;

/// Moves accounts to another owner.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct BulkTransfer {
    /// Accounts to transfer.
    #[serde(rename = "userIds")]
    #[validate(length(min = 1))]
    pub user_ids: Vec<RecordId>,
    /// `TSA`, `TSM` or `Manager`.
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_transfer_target"))]
    pub target: String,
    /// Reference id of the new owner.
    #[serde(rename = "targetId")]
    #[validate(custom(function = "not_blank"))]
    pub target_id: String,
}

impl BulkTransfer {
    pub fn account_ids(&self) -> Vec<i64> {
        RecordId::collect(&self.user_ids)
    }

    pub fn transfer_target(&self) -> Result<TransferTarget> {
        self.target.parse().map_err(|_| {
            ErrorKind::BadRequest
                .with_message("Invalid transfer type")
                .with_resource("request")
        })
    }
}

/// Approves or rejects pending transfers.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct BulkApproveTransfer {
    #[serde(rename = "userIds")]
    #[validate(length(min = 1))]
    pub user_ids: Vec<RecordId>,
    /// New status, e.g. `Active` or `Rejected`.
    #[validate(custom(function = "not_blank"))]
    pub status: String,
    /// Also move ownership to each account's `transfer_to`.
    #[serde(rename = "updateReferenceIdFromTransferTo")]
    pub update_reference_id_from_transfer_to: bool,
}

impl BulkApproveTransfer {
    pub fn account_ids(&self) -> Vec<i64> {
        RecordId::collect(&self.user_ids)
    }
}

/// One account in a reference-number batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceNumberUpdate {
    pub id: RecordId,
    /// Proposed code. Blank or missing means generate one.
    #[serde(default)]
    pub account_reference_number: Option<String>,
}

/// Assigns reference numbers to accounts that have none.
///
/// `updates` is required and must be an array.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateReferenceNumbers {
    pub updates: Vec<ReferenceNumberUpdate>,
}

impl UpdateReferenceNumbers {
    pub fn into_requests(self) -> Vec<ReferenceRequest> {
        self.updates
            .into_iter()
            .map(|update| ReferenceRequest::new(update.id.get(), update.account_reference_number))
            .collect()
    }
}

#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct BulkUpdateStatus {
    #[serde(rename = "userIds")]
    #[validate(length(min = 1))]
    pub user_ids: Vec<RecordId>,
    #[validate(custom(function = "not_blank"))]
    pub status: String,
}

#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct BulkUpdateType {
    #[serde(rename = "userIds")]
    #[validate(length(min = 1))]
    pub user_ids: Vec<RecordId>,
    /// New `type_client` value.
    #[validate(custom(function = "not_blank"))]
    pub typeclient: String,
}

/// Filters and paging for listing accounts.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct ListAccountsQuery {
    /// Owning agent.
    pub referenceid: Option<String>,
    pub status: Option<String>,
    /// Rows to return, 1-1000. Defaults to 50.
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
    /// Rows to skip.
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

impl ListAccountsQuery {
    pub fn filter(&self) -> AccountFilter {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        AccountFilter {
            referenceid: non_blank(&self.referenceid),
            status: non_blank(&self.status),
        }
    }

    pub fn pagination(&self) -> Pagination {
        let default = Pagination::default();
        Pagination::new(
            self.limit.unwrap_or(default.limit),
            self.offset.unwrap_or(default.offset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fail_validation() -> anyhow::Result<()> {
        let request: BulkTransfer = serde_json::from_str("{}")?;
        let errors = request.validate().err().map(|e| e.errors().len());
        assert_eq!(errors, Some(3));
        Ok(())
    }

    #[test]
    fn transfer_request_parses() -> anyhow::Result<()> {
        let request: BulkTransfer =
            serde_json::from_str(r#"{"userIds":["3",4],"type":"TSM","targetId":"TSM-9"}"#)?;

        request.validate()?;
        assert_eq!(request.account_ids(), vec![3, 4]);
        assert_eq!(request.transfer_target().ok(), Some(TransferTarget::Tsm));
        Ok(())
    }

    #[test]
    fn reference_updates_keep_order() -> anyhow::Result<()> {
        let request: UpdateReferenceNumbers = serde_json::from_str(
            r#"{"updates":[{"id":"2","account_reference_number":" "},{"id":1}]}"#,
        )?;

        let requests = request.into_requests();
        assert_eq!(requests[0].account_id, 2);
        assert_eq!(requests[0].proposed_code(), None);
        assert_eq!(requests[1].account_id, 1);
        Ok(())
    }

    #[test]
    fn list_query_defaults() {
        let query = ListAccountsQuery {
            status: Some("  ".to_owned()),
            limit: Some(20),
            ..Default::default()
        };

        assert_eq!(query.filter(), AccountFilter::default());
        assert_eq!(query.pagination(), Pagination::new(20, 0));
    }
}
