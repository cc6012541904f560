use sqlx::SqlitePool;

use super::manager::DatabaseError;

/// Dynamic admin set, granted at runtime by the bot's owner commands.
/// The static allow-list in config is checked before this table.
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn contains(&self, user_id: i64) -> Result<bool, DatabaseError> {
        let row = sqlx::query("SELECT 1 FROM admins WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}
