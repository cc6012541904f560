//! Broadcast orchestration: authorize the caller, resolve the message
//! text, snapshot the recipient set and fan the message out.

pub mod delivery;
pub mod selector;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::AuthResolver;
use crate::database::homework::HomeworkRepository;
use crate::database::manager::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;
use self::delivery::MessageSender;

/// Shown instead of homework text when no entry exists for the day
pub const HOMEWORK_PLACEHOLDER: &str = "— Записей пока нет.";

/// Fixed pointer appended for the homework-plus-schedule scope
const SCHEDULE_POINTER: &str = "\n\n🗓 Актуальное расписание — в разделе «Расписание».";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastScope {
    /// Literal caller-supplied text
    All,
    /// Synthesized from today's homework entry
    AutoHomework,
    /// Same, with the schedule pointer appended
    AutoHomeworkSchedule,
}

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    pub scope: BroadcastScope,
    #[serde(default)]
    pub text: Option<String>,
}

/// Aggregate outcome returned to the panel. `ok` reflects whether the
/// channel was configured at all; `sent` counts attempts issued, not
/// confirmed deliveries.
#[derive(Debug, Serialize)]
pub struct BroadcastOutcome {
    pub ok: bool,
    pub sent: usize,
    pub scope: BroadcastScope,
}

pub async fn run(
    state: &AppState,
    init_data: Option<&str>,
    request: BroadcastRequest,
) -> Result<BroadcastOutcome, ApiError> {
    let sender = state
        .telegram
        .clone()
        .map(|client| client as Arc<dyn MessageSender>);
    run_with_sender(&state.pool, &state.resolver, sender, init_data, request).await
}

/// Orchestration seam with the channel injected, so tests can observe
/// delivery attempts without a live Bot API.
pub async fn run_with_sender(
    pool: &SqlitePool,
    resolver: &AuthResolver,
    sender: Option<Arc<dyn MessageSender>>,
    init_data: Option<&str>,
    request: BroadcastRequest,
) -> Result<BroadcastOutcome, ApiError> {
    // Enforcing mode; an unauthorized caller causes zero sends
    let caller = resolver.require_admin(init_data, pool).await?;

    let text = resolve_text(pool, &request).await?;
    let recipients = selector::eligible_recipients(pool).await?;

    let Some(sender) = sender else {
        tracing::warn!("broadcast requested but no bot token is configured");
        return Ok(BroadcastOutcome { ok: false, sent: 0, scope: request.scope });
    };

    tracing::info!(
        "admin {} broadcasting {:?} to {} recipients",
        caller.user_id,
        request.scope,
        recipients.len()
    );
    let sent = delivery::fan_out(sender, recipients, text).await;

    Ok(BroadcastOutcome { ok: true, sent, scope: request.scope })
}

async fn resolve_text(pool: &SqlitePool, request: &BroadcastRequest) -> Result<String, ApiError> {
    match request.scope {
        BroadcastScope::All => request
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("Broadcast text is required")),
        BroadcastScope::AutoHomework => {
            Ok(homework_digest(pool, Local::now().date_naive()).await?)
        }
        BroadcastScope::AutoHomeworkSchedule => {
            let mut text = homework_digest(pool, Local::now().date_naive()).await?;
            text.push_str(SCHEDULE_POINTER);
            Ok(text)
        }
    }
}

/// "Homework for today" digest, built from the store at dispatch time
async fn homework_digest(pool: &SqlitePool, date: NaiveDate) -> Result<String, DatabaseError> {
    let entry = HomeworkRepository::new(pool.clone()).for_date(date).await?;
    let body = entry
        .map(|e| e.text)
        .unwrap_or_else(|| HOMEWORK_PLACEHOLDER.to_string());
    Ok(format!("📖 ДЗ на сегодня ({}):\n{}", date, body))
}
