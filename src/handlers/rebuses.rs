use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::json;

use super::utils::ApiResult;
use crate::config;
use crate::database::rebuses::RebusRepository;
use crate::state::AppState;

/// GET /rebuses - Latest puzzles
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult {
    let limit = config::config().api.max_list_limit;
    let items = RebusRepository::new(state.pool.clone()).list(limit).await?;
    Ok(Json(json!({ "items": items })))
}

/// GET /rebuses/top - Score leaderboard
pub async fn top(State(state): State<Arc<AppState>>) -> ApiResult {
    let top = RebusRepository::new(state.pool.clone()).top(20).await?;
    Ok(Json(json!({ "top": top })))
}
