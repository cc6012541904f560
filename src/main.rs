use std::sync::Arc;

use homework_bot_api::database::manager::DatabaseManager;
use homework_bot_api::{config, routes, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_PATH, TELEGRAM_BOT_TOKEN, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Homework Bot API in {:?} mode", config.environment);

    let pool = DatabaseManager::pool()
        .await
        .unwrap_or_else(|e| panic!("failed to open database: {}", e));

    let state = AppState::new(config, pool).expect("failed to build application state");
    let app = routes::build_router(Arc::new(state));

    // Allow tests or deployments to override port via env
    let port = std::env::var("HOMEWORK_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Homework Bot API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
