use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Composition root handed to every handler; owns the store client.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config.database).await?;
        db::migrate(&db).await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Fresh in-memory store with every migration applied.
    #[cfg(test)]
    pub async fn for_tests() -> Self {
        let db = db::connect_in_memory().await.expect("in-memory pool");
        db::migrate(&db).await.expect("migrations apply");
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".into()),
            "DATABASE_MAX_CONNECTIONS" => Some("1".into()),
            _ => None,
        })
        .expect("test config");
        Self::from_parts(db, Arc::new(config))
    }

    /// File-backed store under `dir` with a multi-connection pool, for
    /// tests where requests must really contend for SQLite's write lock.
    #[cfg(test)]
    pub async fn for_tests_on_disk(dir: &std::path::Path) -> Self {
        let url = format!("sqlite://{}", dir.join("edu4all.db").display());
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some(url.clone()),
            "DATABASE_MAX_CONNECTIONS" => Some("5".into()),
            _ => None,
        })
        .expect("test config");
        Self::init(config).await.expect("on-disk store")
    }
}
