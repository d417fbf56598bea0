//! Migration status and outcome types.

use std::time::Duration;

/// Applied and pending migration versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Applied versions in ascending order
    pub applied_versions: Vec<String>,
    /// Embedded versions not yet applied, in ascending order
    pub pending_versions: Vec<String>,
}

impl MigrationStatus {
    /// Creates a new migration status.
    pub fn new(
        applied_versions: impl Into<Vec<String>>,
        pending_versions: impl Into<Vec<String>>,
    ) -> Self {
        Self {
            applied_versions: applied_versions.into(),
            pending_versions: pending_versions.into(),
        }
    }

    /// Returns the share of migrations already applied (0.0 to 1.0).
    pub fn progress_ratio(&self) -> f64 {
        match self.total_migrations() {
            0 => 1.0,
            total => self.applied_migrations() as f64 / total as f64,
        }
    }

    pub fn last_applied_version(&self) -> Option<&str> {
        self.applied_versions.last().map(String::as_str)
    }

    pub fn next_pending_version(&self) -> Option<&str> {
        self.pending_versions.first().map(String::as_str)
    }

    #[inline]
    pub fn applied_migrations(&self) -> usize {
        self.applied_versions.len()
    }

    #[inline]
    pub fn pending_migrations(&self) -> usize {
        self.pending_versions.len()
    }

    #[inline]
    pub fn total_migrations(&self) -> usize {
        self.applied_migrations() + self.pending_migrations()
    }

    #[inline]
    pub fn is_up_to_date(&self) -> bool {
        self.pending_versions.is_empty()
    }
}

/// Outcome of a [`run_pending_migrations`] call.
///
/// [`run_pending_migrations`]: super::run_pending_migrations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Wall-clock time spent applying migrations
    pub duration: Duration,
    /// Versions applied by this run
    pub processed_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a result for a completed run.
    pub fn success(duration: Duration, processed_versions: Vec<String>) -> Self {
        Self {
            duration,
            processed_versions,
        }
    }

    /// Returns whether nothing needed to be applied.
    pub fn is_no_op(&self) -> bool {
        self.processed_versions.is_empty()
    }

    pub fn last_processed_version(&self) -> Option<&str> {
        self.processed_versions.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_with_pending_migrations() {
        let status = MigrationStatus::new(
            vec!["20240601000000".to_owned()],
            vec!["20240601000100".to_owned(), "20240601000200".to_owned()],
        );

        assert!(!status.is_up_to_date());
        assert_eq!(status.total_migrations(), 3);
        assert_eq!(status.last_applied_version(), Some("20240601000000"));
        assert_eq!(status.next_pending_version(), Some("20240601000100"));
    }

    #[test]
    fn empty_status_is_up_to_date() {
        let status = MigrationStatus::new(Vec::<String>::new(), Vec::<String>::new());
        assert!(status.is_up_to_date());
        assert_eq!(status.progress_ratio(), 1.0);
    }

    #[test]
    fn result_without_versions_is_no_op() {
        let result = MigrationResult::success(Duration::from_millis(5), vec![]);
        assert!(result.is_no_op());
        assert_eq!(result.last_processed_version(), None);
    }
}
