//! Diesel-backed adapter for the [`UserRepository`] port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// SQLite-backed account store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create an adapter over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let pool = self.pool.clone();
        let row = NewUserRow {
            username: String::from(user.username),
            password_hash: user.password_hash.as_ref().to_owned(),
            role: user.role.as_str().to_owned(),
        };
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
                let stored: UserRow = diesel::insert_into(users::table)
                    .values(&row)
                    .get_result(&mut conn)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            UserPersistenceError::duplicate(row.username.clone())
                        }
                        other => UserPersistenceError::query(other.to_string()),
                    })?;
                stored.into_domain().map_err(UserPersistenceError::query)
            },
            UserPersistenceError::query,
        )
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let pool = self.pool.clone();
        let name = username.as_ref().to_owned();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
                let row: Option<UserRow> = users::table
                    .filter(users::username.eq(&name))
                    .first(&mut conn)
                    .optional()
                    .map_err(|err| UserPersistenceError::query(err.to_string()))?;
                row.map(UserRow::into_domain)
                    .transpose()
                    .map_err(UserPersistenceError::query)
            },
            UserPersistenceError::query,
        )
        .await
    }
}
