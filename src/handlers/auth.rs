use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde_json::json;

use super::utils::{ApiResult, InitQuery};
use crate::state::AppState;

/// GET /auth/me - Resolve the caller's identity and admin status
///
/// Advisory mode: a verified non-admin gets a normal response with
/// `is_admin: false`; only an unverifiable assertion is rejected.
pub async fn me(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
) -> ApiResult {
    let identity = state.resolver.resolve(query.init.as_deref(), &state.pool).await?;

    Ok(Json(json!({
        "user_id": identity.user_id,
        "username": identity.username,
        "is_admin": identity.is_admin
    })))
}
