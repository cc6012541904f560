use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rebus {
    pub kind: String,
    pub payload: String,
    pub answer: Option<String>,
    pub difficulty: String,
}

/// Leaderboard row: summed score per user joined to the users table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RebusTopEntry {
    pub user_id: i64,
    pub username: String,
    pub score: i64,
}
