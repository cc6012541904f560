use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::utils::{ok, ApiResult, InitQuery};
use crate::config;
use crate::database::users::UserRepository;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdRequest {
    pub user_id: i64,
}

/// GET /users - Newest users first
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult {
    let limit = config::config().api.max_list_limit;
    let users = UserRepository::new(state.pool.clone()).list(limit).await?;
    Ok(Json(json!({ "users": users })))
}

/// GET /users/:user_id - Single user or null
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> ApiResult {
    let user = UserRepository::new(state.pool.clone()).find(user_id).await?;
    Ok(Json(json!({ "user": user })))
}

/// POST /users/block - Exclude a user from broadcasts
///
/// An unknown id is created on the spot so the mute takes effect before
/// the user ever talks to the bot.
pub async fn block(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(payload): Json<UserIdRequest>,
) -> ApiResult {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    UserRepository::new(state.pool.clone()).set_muted_all(payload.user_id, true).await?;
    Ok(ok())
}

/// POST /users/unblock - Re-include a user in broadcasts
pub async fn unblock(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(payload): Json<UserIdRequest>,
) -> ApiResult {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    UserRepository::new(state.pool.clone()).set_muted_all(payload.user_id, false).await?;
    Ok(ok())
}
