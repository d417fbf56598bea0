//! Embedded schema migrations.
//!
//! Migrations ship inside the binary and are applied on startup through
//! [`PgClientMigrationExt`].

mod client_ext;
mod migrate_result;
mod run_migration;
mod run_utility;

pub use client_ext::PgClientMigrationExt;
pub use migrate_result::{MigrationResult, MigrationStatus};
pub use run_migration::run_pending_migrations;
pub use run_utility::{get_applied_migrations, get_migration_status};
