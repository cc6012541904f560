use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::broadcast::delivery::MessageSender;

/// Client for the Telegram Bot API. The token is part of every request URL,
/// so it must never end up in logs or error strings.
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramFile {
    pub file_id: String,
    pub file_unique_id: String,
    /// Relative path on the file endpoint, valid for about an hour
    pub file_path: Option<String>,
}

impl TelegramClient {
    pub fn new(token: String, api_base: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api_base, token })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Send a plain text message to a chat
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .context("Failed to reach the Bot API")?;

        if !response.status().is_success() {
            bail!("Bot API returned error status: {}", response.status());
        }

        let body: ApiEnvelope<serde_json::Value> = response
            .json()
            .await
            .context("Failed to parse sendMessage response")?;
        if !body.ok {
            bail!(
                "sendMessage rejected: {}",
                body.description.unwrap_or_else(|| "no description".to_string())
            );
        }
        Ok(())
    }

    /// Resolve a file id to a downloadable path
    pub async fn get_file(&self, file_id: &str) -> Result<TelegramFile> {
        let response = self
            .client
            .get(self.method_url("getFile"))
            .query(&[("file_id", file_id)])
            .send()
            .await
            .context("Failed to reach the Bot API")?;

        if !response.status().is_success() {
            bail!("Bot API returned error status: {}", response.status());
        }

        let body: ApiEnvelope<TelegramFile> = response
            .json()
            .await
            .context("Failed to parse getFile response")?;
        match body.result {
            Some(file) if body.ok => Ok(file),
            _ => bail!(
                "getFile rejected: {}",
                body.description.unwrap_or_else(|| "no description".to_string())
            ),
        }
    }

    /// Fetch file bytes by the path returned from [`get_file`](Self::get_file)
    pub async fn download(&self, file_path: &str) -> Result<Vec<u8>> {
        let url = format!("{}/file/bot{}/{}", self.api_base, self.token, file_path);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach the file endpoint")?;

        if !response.status().is_success() {
            bail!("File endpoint returned error status: {}", response.status());
        }

        let bytes = response.bytes().await.context("Failed to read file body")?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_message(chat_id, text).await
    }
}
