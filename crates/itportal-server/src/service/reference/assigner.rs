use itportal_postgres::PgError;
use itportal_postgres::model::Account;
use itportal_postgres::query::AccountReferenceRepository;
use itportal_postgres::types::{AccountConstraints, ConstraintViolation};

use super::{CandidateGenerator, RandomCandidateGenerator};

const TRACING_TARGET: &str = "itportal_server::service::reference";

/// Default number of candidates tried per account.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// One account to give a reference code, with an optional requested code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRequest {
    pub account_id: i64,
    pub proposed: Option<String>,
}

impl ReferenceRequest {
    pub fn new(account_id: i64, proposed: Option<String>) -> Self {
        Self {
            account_id,
            proposed,
        }
    }

    /// Returns the trimmed proposed code, if it is not blank.
    pub fn proposed_code(&self) -> Option<&str> {
        self.proposed
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Failure of a bulk reference assignment.
///
/// Accounts handled before the failing one keep their new codes.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    /// Every candidate tried for the account was already taken.
    #[error(
        "Failed to assign a unique reference number to account {account_id} after {attempts} attempts"
    )]
    ReferenceAssignmentFailed { account_id: i64, attempts: u32 },

    #[error(transparent)]
    Database(#[from] PgError),
}

/// Gives accounts unique reference codes, one account at a time.
///
/// For each account: an existing non-blank code is kept; otherwise the
/// proposed code (or a generated one) is checked against other accounts and
/// replaced with fresh candidates until a free one is found. A write that
/// loses a race on the unique index counts as a taken candidate. There is no
/// enclosing transaction.
#[derive(Debug, Clone)]
pub struct BulkReferenceAssigner<G = RandomCandidateGenerator> {
    generator: G,
    max_attempts: u32,
}

impl Default for BulkReferenceAssigner {
    fn default() -> Self {
        Self::new(RandomCandidateGenerator::default(), DEFAULT_MAX_ATTEMPTS)
    }
}

impl<G> BulkReferenceAssigner<G>
where
    G: CandidateGenerator + Sync,
{
    /// Creates an assigner trying at most `max_attempts` candidates per account.
    ///
    /// A zero limit is raised to one.
    pub fn new(generator: G, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Processes `requests` in order and returns the resulting account rows.
    ///
    /// Accounts that do not exist contribute no row. Accounts that already
    /// have a code are returned unchanged. The first failure aborts the
    /// remaining requests.
    pub async fn assign_all<C>(
        &self,
        conn: &mut C,
        requests: Vec<ReferenceRequest>,
    ) -> Result<Vec<Account>, AssignmentError>
    where
        C: AccountReferenceRepository + Send,
    {
        let mut rows = Vec::with_capacity(requests.len());

        for request in requests {
            if let Some(account) = self.assign_one(conn, &request).await? {
                rows.push(account);
            }
        }

        Ok(rows)
    }

    async fn assign_one<C>(
        &self,
        conn: &mut C,
        request: &ReferenceRequest,
    ) -> Result<Option<Account>, AssignmentError>
    where
        C: AccountReferenceRepository + Send,
    {
        let account_id = request.account_id;

        let Some(account) = conn.find_account_by_id(account_id).await? else {
            tracing::debug!(target: TRACING_TARGET, account_id, "account not found, skipping");
            return Ok(None);
        };

        if account.has_reference_code() {
            tracing::debug!(
                target: TRACING_TARGET,
                account_id,
                "account already has a reference number"
            );
            return Ok(Some(account));
        }

        let mut candidate = match request.proposed_code() {
            Some(code) => code.to_owned(),
            None => self.generator.generate(),
        };

        for attempt in 1..=self.max_attempts {
            if conn
                .reference_code_exists_for_other(&candidate, account_id)
                .await?
            {
                tracing::debug!(
                    target: TRACING_TARGET,
                    account_id,
                    attempt,
                    candidate = %candidate,
                    "reference number taken, drawing another"
                );
                candidate = self.generator.generate();
                continue;
            }

            match conn.assign_reference_code(account_id, &candidate).await {
                Ok(row) => {
                    tracing::info!(
                        target: TRACING_TARGET,
                        account_id,
                        attempt,
                        reference_number = %candidate,
                        "reference number assigned"
                    );
                    return Ok(row);
                }
                Err(error) if is_reference_collision(&error) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        account_id,
                        attempt,
                        candidate = %candidate,
                        "reference number claimed concurrently, drawing another"
                    );
                    candidate = self.generator.generate();
                }
                Err(error) => return Err(error.into()),
            }
        }

        tracing::error!(
            target: TRACING_TARGET,
            account_id,
            attempts = self.max_attempts,
            "reference number assignment exhausted its attempts"
        );

        Err(AssignmentError::ReferenceAssignmentFailed {
            account_id,
            attempts: self.max_attempts,
        })
    }
}

fn is_reference_collision(error: &PgError) -> bool {
    matches!(
        error.constraint_violation(),
        Some(ConstraintViolation::Account(
            AccountConstraints::ReferenceNumberUnique
        ))
    )
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use itportal_postgres::PgResult;

    use super::*;

    /// Returns scripted candidates in order.
    struct ScriptedGenerator(Mutex<VecDeque<String>>);

    impl ScriptedGenerator {
        fn new(codes: &[&str]) -> Self {
            Self(Mutex::new(codes.iter().map(|c| c.to_string()).collect()))
        }
    }

    impl CandidateGenerator for ScriptedGenerator {
        fn generate(&self) -> String {
            self.0
                .lock()
                .ok()
                .and_then(|mut codes| codes.pop_front())
                .unwrap_or_else(|| "REF-000000".to_owned())
        }
    }

    struct RaceLost;

    impl DatabaseErrorInformation for RaceLost {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("accounts")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            Some("accounts_reference_number_unique_idx")
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    /// In-memory accounts with scripted existence answers and write failures.
    #[derive(Default)]
    struct StubStore {
        accounts: HashMap<i64, Account>,
        taken_answers: VecDeque<bool>,
        failing_writes: usize,
        checks: Vec<String>,
        writes: Vec<(i64, String)>,
    }

    impl StubStore {
        fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
            Self {
                accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
                ..Self::default()
            }
        }
    }

    impl AccountReferenceRepository for StubStore {
        async fn find_account_by_id(&mut self, account_id: i64) -> PgResult<Option<Account>> {
            Ok(self.accounts.get(&account_id).cloned())
        }

        async fn reference_code_exists_for_other(
            &mut self,
            code: &str,
            exclude_account_id: i64,
        ) -> PgResult<bool> {
            self.checks.push(code.to_owned());
            if let Some(answer) = self.taken_answers.pop_front() {
                return Ok(answer);
            }

            Ok(self.accounts.values().any(|a| {
                a.id != exclude_account_id && a.account_reference_number.as_deref() == Some(code)
            }))
        }

        async fn assign_reference_code(
            &mut self,
            account_id: i64,
            code: &str,
        ) -> PgResult<Option<Account>> {
            if self.failing_writes > 0 {
                self.failing_writes -= 1;
                return Err(PgError::Query(DieselError::DatabaseError(
                    DatabaseErrorKind::UniqueViolation,
                    Box::new(RaceLost),
                )));
            }

            self.writes.push((account_id, code.to_owned()));
            Ok(self.accounts.get_mut(&account_id).map(|account| {
                account.account_reference_number = Some(code.to_owned());
                account.clone()
            }))
        }
    }

    fn account(id: i64, code: Option<&str>) -> Account {
        Account {
            id,
            referenceid: "AGENT-1".to_owned(),
            tsm: String::new(),
            manager: String::new(),
            company_name: format!("Company {id}"),
            contact_person: String::new(),
            contact_number: String::new(),
            email_address: String::new(),
            address: String::new(),
            type_client: String::new(),
            status: "Active".to_owned(),
            transfer_to: None,
            account_reference_number: code.map(str::to_owned),
            created_at: jiff::Timestamp::UNIX_EPOCH.into(),
            updated_at: jiff::Timestamp::UNIX_EPOCH.into(),
        }
    }

    #[tokio::test]
    async fn accounts_without_code_get_generated_code() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(1, None), account(2, Some("  "))]);
        let assigner = BulkReferenceAssigner::default();

        let rows = assigner
            .assign_all(
                &mut store,
                vec![ReferenceRequest::new(1, None), ReferenceRequest::new(2, None)],
            )
            .await?;

        assert_eq!(rows.len(), 2);
        for row in &rows {
            let code = row.reference_code().unwrap_or_default();
            let digits = code.strip_prefix("REF-").unwrap_or_default();
            assert_eq!(digits.len(), 6);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
        Ok(())
    }

    #[tokio::test]
    async fn proposed_code_is_trimmed_and_used() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(5, None)]);
        let assigner = BulkReferenceAssigner::default();

        let rows = assigner
            .assign_all(
                &mut store,
                vec![ReferenceRequest::new(5, Some("  ACME-001 ".to_owned()))],
            )
            .await?;

        assert_eq!(rows[0].reference_code(), Some("ACME-001"));
        assert_eq!(store.writes, vec![(5, "ACME-001".to_owned())]);
        Ok(())
    }

    #[tokio::test]
    async fn existing_codes_are_kept() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(3, Some("REF-111111"))]);
        let assigner = BulkReferenceAssigner::default();

        let rows = assigner
            .assign_all(
                &mut store,
                vec![ReferenceRequest::new(3, Some("NEW-1".to_owned()))],
            )
            .await?;

        assert_eq!(rows, vec![account(3, Some("REF-111111"))]);
        assert!(store.checks.is_empty());
        assert!(store.writes.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_accounts_contribute_no_row() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(1, None)]);
        let assigner = BulkReferenceAssigner::default();

        let rows = assigner
            .assign_all(
                &mut store,
                vec![ReferenceRequest::new(99, None), ReferenceRequest::new(1, None)],
            )
            .await?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        Ok(())
    }

    #[tokio::test]
    async fn retries_until_candidate_is_free() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(1, None)]);
        store.taken_answers = VecDeque::from([true, false]);
        let generator = ScriptedGenerator::new(&["REF-100001", "REF-100002"]);
        let assigner = BulkReferenceAssigner::new(generator, 10);

        let rows = assigner
            .assign_all(&mut store, vec![ReferenceRequest::new(1, None)])
            .await?;

        assert_eq!(store.checks, vec!["REF-100001", "REF-100002"]);
        assert_eq!(store.writes, vec![(1, "REF-100002".to_owned())]);
        assert_eq!(rows[0].reference_code(), Some("REF-100002"));
        Ok(())
    }

    #[tokio::test]
    async fn retry_is_bounded() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(1, None), account(2, None)]);
        store.taken_answers = VecDeque::from(vec![true; 16]);
        let assigner = BulkReferenceAssigner::new(RandomCandidateGenerator::default(), 4);

        let result = assigner
            .assign_all(
                &mut store,
                vec![ReferenceRequest::new(1, None), ReferenceRequest::new(2, None)],
            )
            .await;

        assert!(matches!(
            result,
            Err(AssignmentError::ReferenceAssignmentFailed {
                account_id: 1,
                attempts: 4
            })
        ));
        assert_eq!(store.checks.len(), 4);
        assert!(store.writes.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn earlier_items_stay_assigned_when_a_later_one_fails() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(1, None), account(2, None)]);
        store.taken_answers = VecDeque::from([false, true, true]);
        let assigner = BulkReferenceAssigner::new(RandomCandidateGenerator::default(), 2);

        let result = assigner
            .assign_all(
                &mut store,
                vec![ReferenceRequest::new(1, None), ReferenceRequest::new(2, None)],
            )
            .await;

        assert!(result.is_err());
        assert_eq!(store.writes.len(), 1);
        assert_eq!(store.writes[0].0, 1);
        assert!(store.accounts[&1].has_reference_code());
        Ok(())
    }

    #[tokio::test]
    async fn unique_violation_on_write_draws_new_candidate() -> anyhow::Result<()> {
        let mut store = StubStore::with_accounts([account(1, None)]);
        store.failing_writes = 1;
        let generator = ScriptedGenerator::new(&["REF-200001", "REF-200002"]);
        let assigner = BulkReferenceAssigner::new(generator, 10);

        let rows = assigner
            .assign_all(&mut store, vec![ReferenceRequest::new(1, None)])
            .await?;

        assert_eq!(store.checks, vec!["REF-200001", "REF-200002"]);
        assert_eq!(store.writes, vec![(1, "REF-200002".to_owned())]);
        assert_eq!(rows[0].reference_code(), Some("REF-200002"));
        Ok(())
    }

    #[test]
    fn zero_attempts_is_raised_to_one() {
        let assigner = BulkReferenceAssigner::new(RandomCandidateGenerator::default(), 0);
        assert_eq!(assigner.max_attempts(), 1);
    }
}
