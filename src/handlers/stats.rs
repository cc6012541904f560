use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::utils::InitQuery;
use crate::database::stats::{StatsOverview, StatsRepository};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /stats - Counters for the admin tab (enforcing: admin only)
pub async fn get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
) -> Result<Json<StatsOverview>, ApiError> {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    let overview = StatsRepository::new(state.pool.clone()).overview().await?;
    Ok(Json(overview))
}
