use sqlx::{Row, SqlitePool};

use super::manager::DatabaseError;

/// Key-value flag storage ('1'/'0' strings, as written by the bot)
pub struct FlagRepository {
    pool: SqlitePool,
}

impl FlagRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Missing key reads as false
    pub async fn get_bool(&self, key: &str) -> Result<bool, DatabaseError> {
        let row = sqlx::query("SELECT value FROM flags WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("value") == "1").unwrap_or(false))
    }

    pub async fn set_bool(&self, key: &str, value: bool) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO flags (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(if value { "1" } else { "0" })
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
