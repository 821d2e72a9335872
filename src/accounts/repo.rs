//! Account persistence, generic over the account kind.
//!
//! Every write is a single statement, so it is atomic on its own and takes
//! SQLite's write lock up front, where the busy timeout applies. Each call
//! borrows one pooled connection and returns it when the guard drops, on
//! success and on every error path. Password hashing runs before the
//! statement, on the blocking pool.

use std::marker::PhantomData;

use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::debug;

use crate::accounts::{repo_types::AccountKind, services::off_executor};
use crate::error::{is_unique_violation, AppError};
use crate::pagination::Pagination;

pub struct AccountRepo<'a, K> {
    pool: &'a SqlitePool,
    kind: PhantomData<K>,
}

impl<'a, K: AccountKind> AccountRepo<'a, K> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            kind: PhantomData,
        }
    }

    /// Insert a new account. Fails with `Conflict` if the email is taken
    /// within this kind.
    pub async fn create(&self, input: K::Create) -> Result<K::Record, AppError> {
        let values = off_executor(move || K::new_row(input)).await?;
        let placeholders = vec!["?"; K::COLUMNS.len() + 1].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}, created_at) VALUES ({}) RETURNING {}",
            K::TABLE,
            K::COLUMNS.join(", "),
            placeholders,
            K::select_list()
        );
        debug!(sql = %sql, "query");

        let mut query = sqlx::query_as::<_, K::Record>(&sql);
        for value in values {
            query = query.bind(value);
        }
        let record = query
            .bind(OffsetDateTime::now_utc())
            .fetch_one(self.pool)
            .await
            .map_err(Self::classify)?;
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<K::Record, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", K::select_list(), K::TABLE);
        sqlx::query_as::<_, K::Record>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(K::RESOURCE, id))
    }

    /// Accounts in insertion order.
    pub async fn list(&self, page: Pagination) -> Result<Vec<K::Record>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id LIMIT ? OFFSET ?",
            K::select_list(),
            K::TABLE
        );
        let rows = sqlx::query_as::<_, K::Record>(&sql)
            .bind(page.capped_limit())
            .bind(page.offset)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<K::Record>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE email = ?", K::select_list(), K::TABLE);
        let record = sqlx::query_as::<_, K::Record>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(record)
    }

    /// Apply a partial update. Absent fields bind NULL and keep the stored
    /// value through `COALESCE`; supplied fields, empty strings included,
    /// overwrite it.
    pub async fn update(&self, id: i64, patch: K::Update) -> Result<K::Record, AppError> {
        let changes = off_executor(move || K::changes(patch)).await?;

        let assignments = K::COLUMNS
            .iter()
            .map(|c| format!("{c} = COALESCE(?, {c})"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? RETURNING {}",
            K::TABLE,
            assignments,
            K::select_list()
        );
        debug!(sql = %sql, "query");

        let mut query = sqlx::query_as::<_, K::Record>(&sql);
        for value in changes {
            query = query.bind(value);
        }
        query
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(Self::classify)?
            .ok_or_else(|| AppError::not_found(K::RESOURCE, id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", K::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(K::RESOURCE, id));
        }
        Ok(())
    }

    fn classify(e: sqlx::Error) -> AppError {
        if is_unique_violation(&e) {
            AppError::Conflict(format!("{} email already registered", K::RESOURCE))
        } else {
            AppError::Storage(e)
        }
    }
}
