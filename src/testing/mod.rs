//! Shared fixtures for unit tests.

use hmac::{Hmac, Mac};
use percent_encoding::percent_decode_str;
use sha2::Sha256;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseManager;

/// Bootstrapped in-memory database. Capped at one connection so every
/// statement sees the same memory-backed file.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    DatabaseManager::bootstrap(&pool).await.expect("bootstrap schema");
    pool
}

/// Build an init-data string signed the way the platform signs it. Pairs
/// are the raw (still percent-encoded) key/values; the hash entry is
/// appended.
pub fn signed_init_data(pairs: &[(&str, &str)], token: &str) -> String {
    type HmacSha256 = Hmac<Sha256>;

    let mut sorted: Vec<_> = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let data_check_string = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, percent_decode_str(v).decode_utf8().unwrap()))
        .collect::<Vec<_>>()
        .join("\n");

    let mut key_mac = HmacSha256::new_from_slice(b"WebAppData").unwrap();
    key_mac.update(token.as_bytes());
    let signing_key = key_mac.finalize().into_bytes();

    let mut mac = HmacSha256::new_from_slice(&signing_key).unwrap();
    mac.update(data_check_string.as_bytes());
    let hash = hex::encode(mac.finalize().into_bytes());

    let mut joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    joined.push_str("&hash=");
    joined.push_str(&hash);
    joined
}
