use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::utils::{ok, ApiResult, InitQuery};
use crate::database::flags::FlagRepository;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ModesRequest {
    #[serde(default)]
    pub vacation: bool,
    #[serde(default)]
    pub maintenance: bool,
}

/// GET /modes - Current bot mode flags
pub async fn get(State(state): State<Arc<AppState>>) -> ApiResult {
    let flags = FlagRepository::new(state.pool.clone());
    let vacation = flags.get_bool("vacation").await?;
    let maintenance = flags.get_bool("maintenance").await?;
    Ok(Json(json!({ "vacation": vacation, "maintenance": maintenance })))
}

/// POST /modes - Set both flags; an omitted field switches the mode off
pub async fn set(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(payload): Json<ModesRequest>,
) -> ApiResult {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    let flags = FlagRepository::new(state.pool.clone());
    flags.set_bool("vacation", payload.vacation).await?;
    flags.set_bool("maintenance", payload.maintenance).await?;
    Ok(ok())
}
