use sqlx::SqlitePool;

use super::manager::DatabaseError;
use super::models::ScheduleFile;

pub struct ScheduleRepository {
    pool: SqlitePool,
}

impl ScheduleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recently added files for a section, newest first
    pub async fn latest(&self, kind: &str, limit: i64) -> Result<Vec<ScheduleFile>, DatabaseError> {
        let files = sqlx::query_as::<_, ScheduleFile>(
            "SELECT id, kind, file_id, file_unique_id FROM schedules
             WHERE kind = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(kind)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(files)
    }

    pub async fn add(
        &self,
        kind: &str,
        file_id: &str,
        file_unique_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO schedules (kind, file_id, file_unique_id) VALUES (?, ?, ?)")
            .bind(kind)
            .bind(file_id)
            .bind(file_unique_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear(&self, kind: &str) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM schedules WHERE kind = ?")
            .bind(kind)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
