use sqlx::SqlitePool;

use super::manager::DatabaseError;
use super::models::{Rebus, RebusTopEntry};

pub struct RebusRepository {
    pool: SqlitePool,
}

impl RebusRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<Rebus>, DatabaseError> {
        let items = sqlx::query_as::<_, Rebus>(
            "SELECT kind, payload, answer, COALESCE(difficulty, 'medium') AS difficulty
             FROM rebuses ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Leaderboard: total score per user, usernames falling back to ''
    pub async fn top(&self, limit: i64) -> Result<Vec<RebusTopEntry>, DatabaseError> {
        let top = sqlx::query_as::<_, RebusTopEntry>(
            "SELECT rs.user_id AS user_id,
                    SUM(rs.score) AS score,
                    COALESCE(u.username, '') AS username
             FROM rebus_stats rs
             LEFT JOIN users u ON u.user_id = rs.user_id
             GROUP BY rs.user_id
             ORDER BY score DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(top)
    }
}
