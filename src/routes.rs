// HTTP routes configuration

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/me", get(handlers::auth::me))
        // Homework
        .route("/homework", get(handlers::homework::get).post(handlers::homework::save))
        .route("/homework/delete", post(handlers::homework::delete))
        // Schedule files
        .route("/schedule", post(handlers::schedule::add))
        .route("/schedule/clear", post(handlers::schedule::clear))
        .route("/schedule/:kind", get(handlers::schedule::list))
        // Rebus puzzles
        .route("/rebuses", get(handlers::rebuses::list))
        .route("/rebuses/top", get(handlers::rebuses::top))
        // Users
        .route("/users", get(handlers::users::list))
        .route("/users/block", post(handlers::users::block))
        .route("/users/unblock", post(handlers::users::unblock))
        .route("/users/:user_id", get(handlers::users::get))
        // Classes (panel compatibility)
        .route("/classes", get(handlers::classes::list))
        .route("/classes/search", get(handlers::classes::search))
        .route("/classes/join", post(handlers::classes::join))
        .route("/classes/:class_id", get(handlers::classes::get))
        // Modes, stats, broadcast, file proxy
        .route("/modes", get(handlers::modes::get).post(handlers::modes::set))
        .route("/stats", get(handlers::stats::get))
        .route("/broadcast", post(handlers::broadcast::post))
        .route("/file/:file_id", get(handlers::files::get))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Homework Bot API (Rust)",
        "version": version,
        "description": "Backend for the Homework Bot web panel",
        "endpoints": {
            "auth": "/auth/me (advisory admin check)",
            "homework": "/homework (GET public, POST admin), /homework/delete (admin)",
            "schedule": "/schedule/:kind (public), /schedule, /schedule/clear (admin)",
            "rebuses": "/rebuses, /rebuses/top (public)",
            "users": "/users, /users/:id (public), /users/block, /users/unblock (admin)",
            "modes": "/modes (GET public, POST admin)",
            "stats": "/stats (admin)",
            "broadcast": "/broadcast (admin)",
            "files": "/file/:file_id (public proxy)",
        }
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
