use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Inquiry, UpdateInquiry};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for customer inquiries.
pub trait InquiryRepository {
    /// Applies a partial update, returning `None` if no row has this id.
    fn update_inquiry(
        &mut self,
        inquiry_id: i64,
        changes: UpdateInquiry,
    ) -> impl Future<Output = PgResult<Option<Inquiry>>> + Send;
}

impl InquiryRepository for PgConnection {
    async fn update_inquiry(
        &mut self,
        inquiry_id: i64,
        mut changes: UpdateInquiry,
    ) -> PgResult<Option<Inquiry>> {
        use schema::inquiries::{self, dsl};

        changes.updated_at = Some(jiff::Timestamp::now().into());

        diesel::update(inquiries::table.filter(dsl::id.eq(inquiry_id)))
            .set(&changes)
            .returning(Inquiry::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
