//! Best-effort fan-out over the external channel.
//!
//! Each recipient gets its own send task; a failed or blocked recipient is
//! logged and skipped, never aborting the rest of the batch. There is no
//! retry and no per-recipient receipt, only the aggregate attempt count.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::task::JoinSet;

/// Outbound "send text to recipient" primitive. Implemented by
/// [`TelegramClient`](crate::telegram::TelegramClient) and by test doubles.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;
}

/// Scatter one message to every recipient and wait for all attempts to
/// finish. Returns the number of attempts issued, which is independent of
/// per-recipient success.
pub async fn fan_out(sender: Arc<dyn MessageSender>, recipients: Vec<i64>, text: String) -> usize {
    let mut tasks = JoinSet::new();
    for chat_id in recipients {
        let sender = Arc::clone(&sender);
        let text = text.clone();
        tasks.spawn(async move {
            if let Err(e) = sender.send_text(chat_id, &text).await {
                tracing::warn!("broadcast delivery to {} failed: {:#}", chat_id, e);
            }
        });
    }

    let mut attempted = 0;
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            // A panicked send task still counts as an issued attempt
            tracing::warn!("broadcast send task aborted: {}", e);
        }
        attempted += 1;
    }
    attempted
}
