use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::utils::InitQuery;
use crate::broadcast::{self, BroadcastOutcome, BroadcastRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /broadcast - Fan a message out to every unmuted user
///
/// `sent` counts delivery attempts, not confirmed receipts; `ok` is false
/// when the bot token is missing and no channel exists at all.
pub async fn post(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(request): Json<BroadcastRequest>,
) -> Result<Json<BroadcastOutcome>, ApiError> {
    let outcome = broadcast::run(&state, query.init.as_deref(), request).await?;
    Ok(Json(outcome))
}
