// Application state (AppState)

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::auth::AuthResolver;
use crate::config::AppConfig;
use crate::telegram::TelegramClient;

/// Shared application state handed to every handler.
///
/// The bot token feeds two consumers: the init-data verifier inside the
/// resolver and the outbound client. Without it the service still serves
/// reads; verification always fails and broadcasting is a no-op.
pub struct AppState {
    pub pool: SqlitePool,
    pub resolver: AuthResolver,
    pub telegram: Option<Arc<TelegramClient>>,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: SqlitePool) -> Result<Self> {
        let telegram = match &config.telegram.bot_token {
            Some(token) => Some(Arc::new(TelegramClient::new(
                token.clone(),
                config.telegram.api_base.clone(),
            )?)),
            None => {
                tracing::warn!(
                    "TELEGRAM_BOT_TOKEN is not set; admin auth and broadcasting are disabled"
                );
                None
            }
        };

        let resolver = AuthResolver::new(
            config.telegram.bot_token.clone(),
            config.security.admin_ids.iter().copied(),
        );

        Ok(Self { pool, resolver, telegram })
    }
}
