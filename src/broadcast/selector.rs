use sqlx::{Row, SqlitePool};

use crate::database::manager::DatabaseError;

/// Ids eligible for a broadcast: every user whose `muted_all` flag is unset
/// or false. A point-in-time snapshot; concurrent mute toggles may race
/// with delivery and that is accepted.
pub async fn eligible_recipients(pool: &SqlitePool) -> Result<Vec<i64>, DatabaseError> {
    let rows = sqlx::query("SELECT user_id FROM users WHERE muted_all IS NULL OR muted_all = 0")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(|r| r.get::<i64, _>("user_id")).collect())
}
