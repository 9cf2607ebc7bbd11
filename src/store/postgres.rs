use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Postgres, Row, Transaction};

use crate::core::error::Error;
use crate::store::{SortOrder, User, UserStore, sort_column};

/// Runs `op` inside a transaction, committing on success and rolling
/// back on error.
pub(crate) async fn transaction<T, F>(pool: &PgPool, op: F) -> Result<T, Error>
where
    F: AsyncFnOnce(&mut Transaction<'static, Postgres>) -> Result<T, Error>,
{
    let mut tx = pool.begin().await?;

    match op(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;

            Ok(value)
        }
        Err(e) => {
            tx.rollback().await?;

            Err(e)
        }
    }
}

fn map_user(row: PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        password_hash: row.get("password_hash"),
        current_refresh_token: row.get("current_refresh_token"),
        user_type: row.get("type"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        match sqlx::query(
            "SELECT id, username, email, full_name, password_hash, current_refresh_token, type, \
             status, created_at, updated_at FROM users WHERE username = $1;",
        )
        .bind(username)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, Error> {
        match sqlx::query(
            "SELECT id, username, email, full_name, password_hash, current_refresh_token, type, \
             status, created_at, updated_at FROM users WHERE id = $1;",
        )
        .bind(id)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    async fn insert(
        &self,
        username: &str,
        email: &str,
        full_name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, Error> {
        transaction(&self.pool, async |tx| {
            let existing = sqlx::query("SELECT id FROM users WHERE username = $1;")
                .bind(username)
                .fetch_optional(&mut **tx)
                .await?;

            if existing.is_some() {
                return Err(Error::UserAlreadyExists);
            }

            match sqlx::query(
                "INSERT INTO users (username, email, full_name, password_hash) VALUES ($1, $2, \
                 $3, $4) RETURNING id, username, email, full_name, password_hash, \
                 current_refresh_token, type, status, created_at, updated_at;",
            )
            .bind(username)
            .bind(email)
            .bind(full_name)
            .bind(password_hash)
            .map(map_user)
            .fetch_one(&mut **tx)
            .await
            {
                Ok(user) => Ok(user),
                // The unique constraints still hold for columns the
                // pre-check does not cover, like email.
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    Err(Error::UserAlreadyExists)
                }
                Err(e) => Err(Error::Sql(e)),
            }
        })
        .await
    }

    async fn list(
        &self,
        page: u32,
        size: u32,
        sort_by: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<User>, Error> {
        let order_by = match sort_by {
            Some(column) => format!("ORDER BY {} {} ", sort_column(column)?, order.as_sql()),
            None => String::new(),
        };

        let query = format!(
            "SELECT id, username, email, full_name, password_hash, current_refresh_token, type, \
             status, created_at, updated_at FROM users {}LIMIT $1 OFFSET $2;",
            order_by
        );

        let users = sqlx::query(&query)
            .bind(i64::from(size))
            .bind(i64::from((page - 1) * size))
            .map(map_user)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn count(&self) -> Result<i64, Error> {
        let total = sqlx::query("SELECT COUNT(*) FROM users;")
            .map(|row: PgRow| row.get("count"))
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn set_refresh_token(&self, id: i32, token: Option<&str>) -> Result<bool, Error> {
        let result = sqlx::query(
            "UPDATE users SET current_refresh_token = $2, updated_at = now() WHERE id = $1;",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1;")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, Error> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = now(), updated_at = now() WHERE id = $1;")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
