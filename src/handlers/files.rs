use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /file/:file_id - Proxy a Telegram file to the browser
///
/// The panel cannot download by file id itself; this resolves the id via
/// getFile and streams the bytes through, hiding the bot token.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Response, ApiError> {
    let Some(client) = state.telegram.as_ref() else {
        return Err(ApiError::service_unavailable("Bot is not configured"));
    };

    let file = client.get_file(&file_id).await.map_err(|e| {
        tracing::warn!("getFile for {} failed: {:#}", file_id, e);
        ApiError::bad_gateway("Failed to resolve file")
    })?;
    let Some(path) = file.file_path else {
        return Err(ApiError::bad_gateway("File has no downloadable path"));
    };

    let bytes = client.download(&path).await.map_err(|e| {
        tracing::warn!("download of {} failed: {:#}", path, e);
        ApiError::bad_gateway("Failed to download file")
    })?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response())
}

/// Schedule files are photos in practice; anything else goes out as bytes
fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
