use serde::Serialize;
use sqlx::{Row, SqlitePool};

use super::manager::DatabaseError;

/// Counters for the admin stats tab
#[derive(Debug, Serialize)]
pub struct StatsOverview {
    pub users: i64,
    pub homework: i64,
    pub rebuses: i64,
    pub sessions: i64,
    /// Most clicked bot buttons over the last 14 days, as [text, count] pairs
    #[serde(rename = "topClicks")]
    pub top_clicks: Vec<(String, i64)>,
}

pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn overview(&self) -> Result<StatsOverview, DatabaseError> {
        let users = self.count("SELECT COUNT(*) AS n FROM users").await?;
        let homework = self.count("SELECT COUNT(*) AS n FROM homework").await?;
        let rebuses = self.count("SELECT COUNT(*) AS n FROM rebuses").await?;
        let sessions = self.count("SELECT COUNT(*) AS n FROM rebus_stats").await?;

        let rows = sqlx::query(
            "SELECT text, COUNT(*) AS c FROM events
             WHERE created_at >= datetime('now', '-14 day')
             GROUP BY text ORDER BY c DESC LIMIT 8",
        )
        .fetch_all(&self.pool)
        .await?;
        let top_clicks = rows
            .iter()
            .map(|r| (r.get::<String, _>("text"), r.get::<i64, _>("c")))
            .collect();

        Ok(StatsOverview { users, homework, rebuses, sessions, top_clicks })
    }

    async fn count(&self, query: &str) -> Result<i64, DatabaseError> {
        let row = sqlx::query(query).fetch_one(&self.pool).await?;
        Ok(row.get::<i64, _>("n"))
    }
}
