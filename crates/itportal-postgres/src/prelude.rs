//! Prelude module for itportal-postgres.
//!
//! Re-exports the client, error and repository types most handlers need.
//!
//! ```rust,ignore
//! use itportal_postgres::prelude::*;
//!
//! let client = PgConfig::new("postgresql://localhost/itportal").build()?;
//! let mut conn = client.get_connection().await?;
//! let deleted = conn.delete_progress_entries(&[1, 2]).await?;
//! ```

pub use diesel_async::RunQueryDsl;

pub use crate::PgConnection;
pub use crate::client::{PgClient, PgClientMigrationExt, PgConfig, PgConn, PgPoolStatus};
pub use crate::query::{
    AccountReferenceRepository, AccountRepository, ActivityRepository, InquiryRepository,
    Pagination, ProgressRepository, UserRepository,
};
pub use crate::{PgError, PgResult};
