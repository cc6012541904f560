use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub telegram: TelegramConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the sqlite database file shared with the bot process
    pub path: String,
    pub max_connections: u32,
    pub create_if_missing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    /// Hard cap for list endpoints (users, rebuses, schedule files)
    pub max_list_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token, doubling as the init-data shared secret. Absent token
    /// degrades verification to always-fail and broadcasting to a no-op.
    pub bot_token: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Static allow-list of admin user ids, checked before the admins table
    pub admin_ids: Vec<i64>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_PATH") {
            self.database.path = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CREATE_IF_MISSING") {
            self.database.create_if_missing = v.parse().unwrap_or(self.database.create_if_missing);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_LIST_LIMIT") {
            self.api.max_list_limit = v.parse().unwrap_or(self.api.max_list_limit);
        }

        // Telegram overrides
        if let Ok(v) = env::var("TELEGRAM_BOT_TOKEN") {
            if !v.trim().is_empty() {
                self.telegram.bot_token = Some(v);
            }
        }
        if let Ok(v) = env::var("TELEGRAM_API_BASE") {
            self.telegram.api_base = v;
        }

        // Security overrides
        if let Ok(v) = env::var("ADMIN_IDS") {
            self.security.admin_ids = v
                .split(',')
                .filter_map(|s| s.trim().parse::<i64>().ok())
                .collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                path: "bot.db".to_string(),
                max_connections: 5,
                create_if_missing: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_list_limit: 100,
            },
            telegram: TelegramConfig {
                bot_token: None,
                api_base: "https://api.telegram.org".to_string(),
            },
            security: SecurityConfig { admin_ids: vec![] },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                path: "bot.db".to_string(),
                max_connections: 10,
                create_if_missing: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_list_limit: 100,
            },
            telegram: TelegramConfig {
                bot_token: None,
                api_base: "https://api.telegram.org".to_string(),
            },
            security: SecurityConfig { admin_ids: vec![] },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                path: "bot.db".to_string(),
                max_connections: 20,
                create_if_missing: false,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_list_limit: 100,
            },
            telegram: TelegramConfig {
                bot_token: None,
                api_base: "https://api.telegram.org".to_string(),
            },
            security: SecurityConfig { admin_ids: vec![] },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.database.create_if_missing);
        assert!(config.api.enable_request_logging);
        assert!(config.telegram.bot_token.is_none());
        assert!(config.security.admin_ids.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.database.create_if_missing);
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.database.max_connections, 20);
    }
}
