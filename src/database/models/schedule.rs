use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A schedule image stored as a Telegram file reference. The panel never
/// sees the raw id directly; it is wrapped as an opaque `telegram-file:` uri.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleFile {
    pub id: i64,
    pub kind: String,
    pub file_id: String,
    pub file_unique_id: Option<String>,
}
