use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fixture bot token shared by the server env and the signing helper
pub const TEST_BOT_TOKEN: &str = "1234567890:TEST_TOKEN_abc";

/// The one id listed in ADMIN_IDS for the spawned server
pub const ADMIN_ID: i64 = 100;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
    // Keeps the sqlite file alive for the duration of the test binary
    #[allow(dead_code)]
    data_dir: tempfile::TempDir,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let data_dir = tempfile::tempdir().context("failed to create temp dir")?;
        let db_path = data_dir.path().join("bot.db");

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/homework-bot-api");
        cmd.env("APP_ENV", "development")
            .env("HOMEWORK_API_PORT", port.to_string())
            .env("DATABASE_PATH", db_path)
            .env("TELEGRAM_BOT_TOKEN", TEST_BOT_TOKEN)
            .env("ADMIN_IDS", ADMIN_ID.to_string())
            // Point the Bot API at a dead local port: broadcasts are issued
            // and swallowed instead of reaching Telegram
            .env("TELEGRAM_API_BASE", "http://127.0.0.1:9")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child, data_dir })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            let url = format!("{}/health", self.base_url);
            match client.get(&url).send().await {
                Ok(resp) => {
                    if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Build an init-data assertion signed with the fixture token, the way the
/// Telegram client side signs it
pub fn signed_init_for(user_id: i64, username: &str) -> String {
    let user = format!(
        "%7B%22id%22%3A{}%2C%22username%22%3A%22{}%22%7D",
        user_id, username
    );
    let pairs = [("auth_date", "1700000000"), ("user", user.as_str())];

    let mut sorted = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let data_check_string = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, percent_decode(v)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut key_mac = HmacSha256::new_from_slice(b"WebAppData").unwrap();
    key_mac.update(TEST_BOT_TOKEN.as_bytes());
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

pub fn admin_init() -> String {
    signed_init_for(ADMIN_ID, "teacher")
}

/// Percent-decoding small enough for fixture strings (no '+' handling, as
/// in the real assertion format)
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 3 <= bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
            out.push(u8::from_str_radix(hex, 16).unwrap());
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap()
}
