use diesel::migration::{Migration, MigrationSource};
use diesel::pg::Pg;
use diesel::sql_query;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use super::MigrationStatus;
use crate::{MIGRATIONS, PgError, PgResult, TRACING_TARGET_MIGRATION};

#[derive(diesel::QueryableByName)]
struct ExistsResult {
    #[diesel(sql_type = diesel::sql_types::Bool)]
    exists: bool,
}

/// Lists embedded migration versions in ascending order.
fn embedded_versions() -> PgResult<Vec<String>> {
    let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).map_err(PgError::Migration)?;
    let mut versions: Vec<String> = migrations
        .iter()
        .map(|m| m.name().version().to_string())
        .collect();
    versions.sort();
    Ok(versions)
}

async fn migration_table_exists(conn: &mut AsyncPgConnection) -> PgResult<bool> {
    let result = sql_query(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_name = '__diesel_schema_migrations'
         ) AS exists",
    )
    .get_result::<ExistsResult>(conn)
    .await
    .map_err(|e| PgError::Migration(format!("Failed to check migration table: {e}").into()))?;

    Ok(result.exists)
}

/// Compares embedded migrations against the applied ones.
#[tracing::instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_migration_status(conn: &mut AsyncPgConnection) -> PgResult<MigrationStatus> {
    let applied_versions = get_applied_migrations(conn).await?;
    let pending_versions: Vec<String> = embedded_versions()?
        .into_iter()
        .filter(|version| !applied_versions.contains(version))
        .collect();

    let status = MigrationStatus::new(applied_versions, pending_versions);

    tracing::debug!(
        target: TRACING_TARGET_MIGRATION,
        applied = status.applied_migrations(),
        pending = status.pending_migrations(),
        "Migration status retrieved"
    );

    Ok(status)
}

/// Lists applied migration versions; empty on a fresh database.
#[tracing::instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_applied_migrations(conn: &mut AsyncPgConnection) -> PgResult<Vec<String>> {
    #[derive(diesel::QueryableByName)]
    struct MigrationVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    if !migration_table_exists(conn).await? {
        return Ok(Vec::new());
    }

    let versions = sql_query("SELECT version FROM __diesel_schema_migrations ORDER BY version")
        .get_results::<MigrationVersion>(conn)
        .await
        .map_err(|e| PgError::Migration(format!("Failed to get applied migrations: {e}").into()))?
        .into_iter()
        .map(|row| row.version)
        .collect();

    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_versions_are_sorted() -> anyhow::Result<()> {
        let versions = embedded_versions()?;
        assert_eq!(
            versions,
            vec!["20240601000000", "20240601000100", "20240601000200"]
        );
        Ok(())
    }
}
