//! Lookups and writes behind reference-code assignment.

use std::future::Future;

use diesel::dsl::{exists, now};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::Account;
use crate::{PgConnection, PgError, PgResult, schema};

/// Storage operations the reference-code assigner needs.
pub trait AccountReferenceRepository {
    fn find_account_by_id(
        &mut self,
        account_id: i64,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Returns whether an account other than `exclude_account_id` holds `code`.
    ///
    /// Comparison is exact.
    fn reference_code_exists_for_other(
        &mut self,
        code: &str,
        exclude_account_id: i64,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Writes `code` to the account and stamps `updated_at`.
    ///
    /// Returns `None` when the account no longer exists. A code already held
    /// elsewhere fails with the `accounts_reference_number_unique_idx` violation.
    fn assign_reference_code(
        &mut self,
        account_id: i64,
        code: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;
}

impl AccountReferenceRepository for PgConnection {
    async fn find_account_by_id(&mut self, account_id: i64) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::id.eq(account_id))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn reference_code_exists_for_other(
        &mut self,
        code: &str,
        exclude_account_id: i64,
    ) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        diesel::select(exists(
            accounts::table
                .filter(dsl::account_reference_number.eq(code))
                .filter(dsl::id.ne(exclude_account_id)),
        ))
        .get_result(self)
        .await
        .map_err(PgError::from)
    }

    async fn assign_reference_code(
        &mut self,
        account_id: i64,
        code: &str,
    ) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        diesel::update(accounts::table.filter(dsl::id.eq(account_id)))
            .set((
                dsl::account_reference_number.eq(code),
                dsl::updated_at.eq(now),
            ))
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
