use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;

/// Handlers answer with the flat JSON shapes the panel consumes
pub type ApiResult = Result<Json<Value>, ApiError>;

/// The plain `{"ok": true}` acknowledgement used by all write endpoints
pub fn ok() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// The init-data assertion rides in the `init` query parameter on every
/// authenticated call (the panel appends `?init=<encoded initData>`)
#[derive(Debug, Deserialize)]
pub struct InitQuery {
    pub init: Option<String>,
}
