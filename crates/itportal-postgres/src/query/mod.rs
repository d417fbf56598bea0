//! Repository traits implemented on [`PgConnection`].
//!
//! Each statement runs in its own implicit transaction.
//!
//! [`PgConnection`]: crate::PgConnection

use serde::{Deserialize, Serialize};

mod account;
mod account_reference;
mod activity;
mod inquiry;
mod progress;
mod user;

pub use account::AccountRepository;
pub use account_reference::AccountReferenceRepository;
pub use activity::ActivityRepository;
pub use inquiry::InquiryRepository;
pub use progress::ProgressRepository;
pub use user::UserRepository;

/// Bounded limit/offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of rows to return (1-1000).
    pub limit: i64,
    /// Number of rows to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates pagination, clamping the limit to 1-1000 and the offset to zero or more.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, 1000),
            offset: offset.max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(50, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_clamped() {
        assert_eq!(Pagination::new(0, -5), Pagination { limit: 1, offset: 0 });
        assert_eq!(Pagination::new(5000, 10).limit, 1000);
    }
}
