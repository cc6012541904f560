use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bot user as shown in the panel. Rows are created by the bot on first
/// contact, or implicitly here when an admin blocks an unknown id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub muted_all: bool,
}
