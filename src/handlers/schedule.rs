use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::utils::{ok, ApiResult, InitQuery};
use crate::database::schedules::ScheduleRepository;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub kind: String,
    pub file_id: String,
    #[serde(default)]
    pub file_unique_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    pub kind: String,
}

/// GET /schedule/:kind - Latest files for a section as opaque ids
///
/// Telegram file ids are not directly downloadable by the browser; the
/// panel resolves each `telegram-file:` uri through `/file/:file_id`.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult {
    let files = ScheduleRepository::new(state.pool.clone()).latest(&kind, 10).await?;
    let files: Vec<String> = files
        .into_iter()
        .map(|f| format!("telegram-file:{}", f.file_id))
        .collect();
    Ok(Json(json!({ "kind": kind, "files": files })))
}

/// POST /schedule - Attach a Telegram file to a section
pub async fn add(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(payload): Json<AddRequest>,
) -> ApiResult {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    ScheduleRepository::new(state.pool.clone())
        .add(&payload.kind, &payload.file_id, payload.file_unique_id.as_deref())
        .await?;
    Ok(ok())
}

/// POST /schedule/clear - Drop every file in a section
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(payload): Json<ClearRequest>,
) -> ApiResult {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    ScheduleRepository::new(state.pool.clone()).clear(&payload.kind).await?;
    Ok(ok())
}
