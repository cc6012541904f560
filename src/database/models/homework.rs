use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HomeworkEntry {
    pub id: i64,
    pub hw_date: NaiveDate,
    pub text: String,
}
