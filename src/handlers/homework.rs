use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::utils::{ok, ApiResult, InitQuery};
use crate::broadcast::HOMEWORK_PLACEHOLDER;
use crate::database::homework::HomeworkRepository;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HomeworkQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub date: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub date: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid date: {}", raw)))
}

/// GET /homework?date=YYYY-MM-DD - Entry for one day, placeholder when absent
pub async fn get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeworkQuery>,
) -> ApiResult {
    let date = parse_date(&query.date)?;
    let entry = HomeworkRepository::new(state.pool.clone()).for_date(date).await?;

    let text = match entry {
        Some(entry) if !entry.text.is_empty() => entry.text,
        Some(_) => "—".to_string(),
        None => HOMEWORK_PLACEHOLDER.to_string(),
    };
    Ok(Json(json!({ "date": query.date, "text": text })))
}

/// POST /homework - Save (upsert) the entry for a day
pub async fn save(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(payload): Json<SaveRequest>,
) -> ApiResult {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    let date = parse_date(&payload.date)?;
    if payload.text.trim().is_empty() {
        return Err(ApiError::bad_request("Homework text is required"));
    }

    HomeworkRepository::new(state.pool.clone()).upsert(date, &payload.text).await?;
    Ok(ok())
}

/// POST /homework/delete - Remove the entry for a day
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitQuery>,
    Json(payload): Json<DeleteRequest>,
) -> ApiResult {
    state.resolver.require_admin(query.init.as_deref(), &state.pool).await?;

    let date = parse_date(&payload.date)?;
    HomeworkRepository::new(state.pool.clone()).delete(date).await?;
    Ok(ok())
}
