use super::{MigrationResult, MigrationStatus, get_migration_status, run_pending_migrations};
use crate::{PgClient, PgResult};

/// Migration entry points on [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies every embedded migration not yet recorded in the database.
    ///
    /// Calling this on an up-to-date schema is a no-op.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;

    /// Compares the embedded migrations with the ones already applied.
    fn get_migration_status(&self) -> impl Future<Output = PgResult<MigrationStatus>> + Send;
}

impl PgClientMigrationExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }

    async fn get_migration_status(&self) -> PgResult<MigrationStatus> {
        let mut conn = self.get_pooled_connection().await?;
        get_migration_status(&mut conn).await
    }
}
