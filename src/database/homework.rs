use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::manager::DatabaseError;
use super::models::HomeworkEntry;

pub struct HomeworkRepository {
    pool: SqlitePool,
}

impl HomeworkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn for_date(&self, date: NaiveDate) -> Result<Option<HomeworkEntry>, DatabaseError> {
        let entry = sqlx::query_as::<_, HomeworkEntry>(
            "SELECT id, hw_date, text FROM homework WHERE hw_date = ?",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    /// One entry per date; saving again replaces the text
    pub async fn upsert(&self, date: NaiveDate, text: &str) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO homework (hw_date, text) VALUES (?, ?)
             ON CONFLICT(hw_date) DO UPDATE SET text = excluded.text",
        )
        .bind(date)
        .bind(text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, date: NaiveDate) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM homework WHERE hw_date = ?")
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
