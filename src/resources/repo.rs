use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::pagination::Pagination;
use crate::resources::{dto::CreateResource, repo_types::Resource};

const RESOURCE: &str = "resource";

pub struct ResourceRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResourceRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateResource) -> Result<Resource, AppError> {
        let resource = sqlx::query_as::<_, Resource>(
            r#"
            INSERT INTO resources (title, resource_type, url, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, resource_type, url, created_at
            "#,
        )
        .bind(input.title)
        .bind(input.resource_type)
        .bind(input.url)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(self.pool)
        .await?;
        Ok(resource)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Resource>, AppError> {
        let rows = sqlx::query_as::<_, Resource>(
            r#"
            SELECT id, title, resource_type, url, created_at
            FROM resources
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.capped_limit())
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Resource, AppError> {
        sqlx::query_as::<_, Resource>(
            r#"
            SELECT id, title, resource_type, url, created_at
            FROM resources
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}
