//! Bulk account maintenance used by the Taskflow admin screens.

use std::future::Future;

use diesel::dsl::now;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use diesel_async::RunQueryDsl;

use super::Pagination;
use crate::model::{Account, AccountFilter};
use crate::types::TransferTarget;
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

diesel::define_sql_function! {
    /// `COALESCE(a, b)` for a nullable and a non-null text column.
    fn coalesce(a: Nullable<Text>, b: Text) -> Text;
}

/// Binds `$statement` to the `UPDATE` that moves the accounts to `$target_id`
/// in the column `$target` selects, then evaluates `$body`.
///
/// Only that column and `updated_at` are written. Each arm builds a
/// differently typed statement, so the body is expanded once per arm.
macro_rules! with_transfer_statement {
    ($target:expr, $account_ids:expr, $target_id:expr, |$statement:ident| $body:expr) => {{
        use schema::accounts::{self, dsl};

        let rows = accounts::table.filter(dsl::id.eq_any($account_ids));
        match $target {
            TransferTarget::Tsa => {
                let $statement = diesel::update(rows)
                    .set((dsl::referenceid.eq($target_id), dsl::updated_at.eq(now)))
                    .returning(Account::as_returning());
                $body
            }
            TransferTarget::Tsm => {
                let $statement = diesel::update(rows)
                    .set((dsl::tsm.eq($target_id), dsl::updated_at.eq(now)))
                    .returning(Account::as_returning());
                $body
            }
            TransferTarget::Manager => {
                let $statement = diesel::update(rows)
                    .set((dsl::manager.eq($target_id), dsl::updated_at.eq(now)))
                    .returning(Account::as_returning());
                $body
            }
        }
    }};
}

/// Repository for multi-row account updates and listings.
///
/// Every bulk update matches rows with `id = ANY($ids)`, stamps
/// `updated_at` and returns the updated rows. Unknown ids are ignored.
pub trait AccountRepository {
    /// Reassigns the accounts to `target_id` in the column chosen by `target`.
    fn bulk_transfer_accounts(
        &mut self,
        account_ids: &[i64],
        target: TransferTarget,
        target_id: &str,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    /// Sets `status`, optionally also moving ownership to `transfer_to`.
    ///
    /// Ownership moves only when `transfer_to` is set. Accounts without a
    /// pending target keep their current `referenceid`.
    fn bulk_approve_transfer(
        &mut self,
        account_ids: &[i64],
        status: &str,
        copy_transfer_to: bool,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    fn bulk_update_account_status(
        &mut self,
        account_ids: &[i64],
        status: &str,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    fn bulk_update_account_type(
        &mut self,
        account_ids: &[i64],
        type_client: &str,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    /// Lists accounts, newest first.
    fn list_accounts(
        &mut self,
        filter: AccountFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;
}

impl AccountRepository for PgConnection {
    async fn bulk_transfer_accounts(
        &mut self,
        account_ids: &[i64],
        target: TransferTarget,
        target_id: &str,
    ) -> PgResult<Vec<Account>> {
        let updated = with_transfer_statement!(target, account_ids, target_id, |statement| {
            statement.get_results(self).await
        })
        .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            column = target.column_name(),
            requested = account_ids.len(),
            updated = updated.len(),
            "Accounts transferred"
        );

        Ok(updated)
    }

    async fn bulk_approve_transfer(
        &mut self,
        account_ids: &[i64],
        status: &str,
        copy_transfer_to: bool,
    ) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        let rows = accounts::table.filter(dsl::id.eq_any(account_ids));
        if copy_transfer_to {
            diesel::update(rows)
                .set((
                    dsl::status.eq(status),
                    dsl::referenceid.eq(coalesce(dsl::transfer_to, dsl::referenceid)),
                    dsl::updated_at.eq(now),
                ))
                .returning(Account::as_returning())
                .get_results(self)
                .await
                .map_err(PgError::from)
        } else {
            diesel::update(rows)
                .set((dsl::status.eq(status), dsl::updated_at.eq(now)))
                .returning(Account::as_returning())
                .get_results(self)
                .await
                .map_err(PgError::from)
        }
    }

    async fn bulk_update_account_status(
        &mut self,
        account_ids: &[i64],
        status: &str,
    ) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        diesel::update(accounts::table.filter(dsl::id.eq_any(account_ids)))
            .set((dsl::status.eq(status), dsl::updated_at.eq(now)))
            .returning(Account::as_returning())
            .get_results(self)
            .await
            .map_err(PgError::from)
    }

    async fn bulk_update_account_type(
        &mut self,
        account_ids: &[i64],
        type_client: &str,
    ) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        diesel::update(accounts::table.filter(dsl::id.eq_any(account_ids)))
            .set((dsl::type_client.eq(type_client), dsl::updated_at.eq(now)))
            .returning(Account::as_returning())
            .get_results(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_accounts(
        &mut self,
        filter: AccountFilter,
        pagination: Pagination,
    ) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        let mut query = accounts::table.select(Account::as_select()).into_boxed();
        if let Some(referenceid) = filter.referenceid {
            query = query.filter(dsl::referenceid.eq(referenceid));
        }
        if let Some(status) = filter.status {
            query = query.filter(dsl::status.eq(status));
        }

        query
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
