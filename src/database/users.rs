use sqlx::SqlitePool;

use super::manager::DatabaseError;
use super::models::UserRecord;

/// Queries over the users table. Blocking a user the panel has never seen
/// creates the row, so the mute survives the user's first bot contact.
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<UserRecord>, DatabaseError> {
        let users = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, username, first_name, COALESCE(muted_all, 0) AS muted_all
             FROM users ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn find(&self, user_id: i64) -> Result<Option<UserRecord>, DatabaseError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, username, first_name, COALESCE(muted_all, 0) AS muted_all
             FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Set the broadcast mute flag, inserting the row if the id is unknown
    pub async fn set_muted_all(&self, user_id: i64, muted: bool) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (user_id, muted_all) VALUES (?, ?)
             ON CONFLICT(user_id) DO UPDATE SET muted_all = excluded.muted_all",
        )
        .bind(user_id)
        .bind(muted)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
