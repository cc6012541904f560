use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::config;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection pool manager for the sqlite database shared with the bot.
///
/// The bot process owns the file; this API opens its own pool over it and
/// creates any missing tables so the panel also works against a fresh file.
pub struct DatabaseManager {
    pool: Arc<RwLock<Option<SqlitePool>>>,
}

impl DatabaseManager {
    fn instance() -> &'static DatabaseManager {
        use std::sync::OnceLock;
        static INSTANCE: OnceLock<DatabaseManager> = OnceLock::new();
        INSTANCE.get_or_init(|| DatabaseManager {
            pool: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the shared pool, creating it lazily from config
    pub async fn pool() -> Result<SqlitePool, DatabaseError> {
        let manager = Self::instance();

        // Fast path: try read lock
        {
            let pool = manager.pool.read().await;
            if let Some(pool) = pool.as_ref() {
                return Ok(pool.clone());
            }
        }

        let db = &config::config().database;
        if db.path.trim().is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_PATH"));
        }

        let options = SqliteConnectOptions::new()
            .filename(&db.path)
            .create_if_missing(db.create_if_missing);

        let pool = SqlitePoolOptions::new()
            .max_connections(db.max_connections)
            .connect_with(options)
            .await?;

        Self::bootstrap(&pool).await?;

        {
            let mut slot = manager.pool.write().await;
            *slot = Some(pool.clone());
        }

        info!("Opened sqlite database: {}", db.path);
        Ok(pool)
    }

    /// Create any missing tables. Statements run one at a time; sqlite's
    /// per-statement atomicity is all this service relies on.
    pub async fn bootstrap(pool: &SqlitePool) -> Result<(), DatabaseError> {
        for ddl in BOOTSTRAP_DDL {
            sqlx::query(ddl).execute(pool).await?;
        }
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close() {
        let manager = Self::instance();
        let mut slot = manager.pool.write().await;
        if let Some(pool) = slot.take() {
            pool.close().await;
            info!("Closed sqlite database pool");
        }
    }
}

/// Schema owned jointly with the bot process; `muted_all` may be NULL on
/// rows written by older bot versions and is treated as "not muted".
const BOOTSTRAP_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS homework (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        hw_date TEXT NOT NULL UNIQUE,
        text TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS schedules (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        kind TEXT NOT NULL,
        file_id TEXT NOT NULL,
        file_unique_id TEXT
    )",
    "CREATE TABLE IF NOT EXISTS rebuses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        kind TEXT NOT NULL,
        payload TEXT NOT NULL,
        answer TEXT,
        difficulty TEXT
    )",
    "CREATE TABLE IF NOT EXISTS rebus_stats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        score INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,
        username TEXT,
        first_name TEXT,
        muted_all INTEGER DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    )",
    "CREATE TABLE IF NOT EXISTS flags (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS admins (
        user_id INTEGER PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    )",
];

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    async fn memory_pool() -> SqlitePool {
        // A single connection keeps every statement on the same in-memory db
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite")
    }

    #[tokio::test]
    async fn bootstrap_creates_all_tables() {
        let pool = memory_pool().await;
        DatabaseManager::bootstrap(&pool).await.unwrap();

        let rows = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<String> = rows.iter().map(|r| r.get("name")).collect();
        for expected in ["homework", "schedules", "rebuses", "rebus_stats", "users", "flags", "admins", "events"] {
            assert!(names.iter().any(|n| n == expected), "missing table {expected}");
        }
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let pool = memory_pool().await;
        DatabaseManager::bootstrap(&pool).await.unwrap();
        DatabaseManager::bootstrap(&pool).await.unwrap();
    }
}
