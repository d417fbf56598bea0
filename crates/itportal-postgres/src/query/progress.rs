use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for progress entries.
pub trait ProgressRepository {
    /// Hard-deletes the entries and returns the ids that existed.
    fn delete_progress_entries(
        &mut self,
        progress_ids: &[i64],
    ) -> impl Future<Output = PgResult<Vec<i64>>> + Send;
}

impl ProgressRepository for PgConnection {
    async fn delete_progress_entries(&mut self, progress_ids: &[i64]) -> PgResult<Vec<i64>> {
        use schema::progress::{self, dsl};

        let deleted: Vec<i64> = diesel::delete(progress::table.filter(dsl::id.eq_any(progress_ids)))
            .returning(dsl::id)
            .get_results(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            requested = progress_ids.len(),
            deleted = deleted.len(),
            "Progress entries deleted"
        );

        Ok(deleted)
    }
}
