//! Staff user repository.

use std::future::Future;

use diesel::dsl::now;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::model::{NewUser, User};
use crate::{PgConnection, PgError, PgResult, schema};

diesel::define_sql_function!(fn lower(x: Text) -> Text);

/// Status of users that are still employed.
const ACTIVE_STATUS: &str = "Active";

/// Repository for staff users.
pub trait UserRepository {
    /// Inserts a user after normalizing it with [`NewUser::normalize`].
    fn create_user(&mut self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Returns whether an active user already uses this email, ignoring case.
    fn email_exists_for_active_user(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Sets `targetquota` on the users and returns `(id, targetquota)` pairs.
    fn bulk_update_target_quota(
        &mut self,
        user_ids: &[i64],
        targetquota: &str,
    ) -> impl Future<Output = PgResult<Vec<(i64, Option<String>)>>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, new_user: NewUser) -> PgResult<User> {
        use schema::users;

        diesel::insert_into(users::table)
            .values(&new_user.normalize())
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn email_exists_for_active_user(&mut self, email: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let email = email.trim().to_lowercase();
        diesel::select(diesel::dsl::exists(
            users::table
                .filter(lower(dsl::email).eq(email))
                .filter(dsl::status.eq(ACTIVE_STATUS)),
        ))
        .get_result(self)
        .await
        .map_err(PgError::from)
    }

    async fn bulk_update_target_quota(
        &mut self,
        user_ids: &[i64],
        targetquota: &str,
    ) -> PgResult<Vec<(i64, Option<String>)>> {
        use schema::users::{self, dsl};

        diesel::update(users::table.filter(dsl::id.eq_any(user_ids)))
            .set((dsl::targetquota.eq(targetquota), dsl::updated_at.eq(now)))
            .returning((dsl::id, dsl::targetquota))
            .get_results(self)
            .await
            .map_err(PgError::from)
    }
}
