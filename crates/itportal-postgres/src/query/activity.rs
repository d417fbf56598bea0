use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Activity, UpdateActivity};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for activity log entries.
pub trait ActivityRepository {
    /// Applies a partial update, returning `None` if no row has this id.
    ///
    /// `updated_at` is always stamped, overriding any value in `changes`.
    fn update_activity(
        &mut self,
        activity_id: i64,
        changes: UpdateActivity,
    ) -> impl Future<Output = PgResult<Option<Activity>>> + Send;
}

impl ActivityRepository for PgConnection {
    async fn update_activity(
        &mut self,
        activity_id: i64,
        mut changes: UpdateActivity,
    ) -> PgResult<Option<Activity>> {
        use schema::activities::{self, dsl};

        changes.updated_at = Some(jiff::Timestamp::now().into());

        diesel::update(activities::table.filter(dsl::id.eq(activity_id)))
            .set(&changes)
            .returning(Activity::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
