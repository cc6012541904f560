//! Class endpoints kept for panel compatibility.
//!
//! The current database has no classes table; the bot serves a single
//! class. The panel still probes these routes, so they answer with the
//! same placeholder shapes the original backend returned.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::utils::{ok, ApiResult, InitQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub class_id: i64,
    #[serde(default)]
    pub join_code: Option<String>,
}

/// GET /classes - Placeholder list
pub async fn list() -> ApiResult {
    Ok(Json(json!({ "classes": [] })))
}

/// GET /classes/search?q= - Placeholder search
pub async fn search() -> ApiResult {
    Ok(Json(json!({ "classes": [] })))
}

/// GET /classes/:class_id - Placeholder lookup
pub async fn get(Path(_class_id): Path<i64>) -> ApiResult {
    Ok(Json(json!({ "cls": null })))
}

/// POST /classes/join - Accept the join for any verified identity
pub async fn join(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(_payload): Json<JoinRequest>,
) -> ApiResult {
    state.resolver.resolve(query.init.as_deref(), &state.pool).await?;
    Ok(ok())
}
