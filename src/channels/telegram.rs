//! Telegram channel — long-polls the Bot API for updates and sends replies.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use reqwest::multipart::{Form, Part};

use crate::channels::{Inbound, Transport};
use crate::error::ChannelError;

/// Maximum message length for Telegram's sendMessage API.
const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

/// Stream of inbound updates.
pub type UpdateStream = Pin<Box<dyn Stream<Item = Inbound> + Send>>;

/// Telegram channel — connects to the Bot API via long-polling.
pub struct TelegramChannel {
    bot_token: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: String) -> Self {
        Self {
            bot_token,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{method}", self.bot_token)
    }

    /// Verify the token against getMe. Called once at startup; a failure
    /// here is fatal.
    pub async fn health_check(&self) -> Result<(), ChannelError> {
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::Http(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ChannelError::Api {
                method: "getMe".into(),
                detail: format!("status {}", resp.status()),
            })
        }
    }

    /// Spawn the long-poll loop and return the stream of inbound updates.
    pub fn start(&self) -> UpdateStream {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let bot_token = self.bot_token.clone();
        let client = self.client.clone();

        tokio::spawn(async move {
            let mut offset: i64 = 0;
            tracing::info!("Telegram channel listening for messages...");

            loop {
                let url = format!("https://api.telegram.org/bot{bot_token}/getUpdates");
                let body = serde_json::json!({
                    "offset": offset,
                    "timeout": 30,
                    "allowed_updates": ["message"]
                });

                let resp = match client.post(&url).json(&body).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("Telegram poll error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                let data: serde_json::Value = match resp.json().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("Telegram parse error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                if let Some(results) = data.get("result").and_then(serde_json::Value::as_array) {
                    for update in results {
                        if let Some(uid) =
                            update.get("update_id").and_then(serde_json::Value::as_i64)
                        {
                            offset = uid + 1;
                        }

                        let Some(inbound) = parse_update(update) else {
                            continue;
                        };

                        if tx.send(inbound).is_err() {
                            tracing::info!("Telegram listener channel closed");
                            return;
                        }
                    }
                }
            }
        });

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Box::pin(stream)
    }

    async fn post_json(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<(), ChannelError> {
        let resp = self
            .client
            .post(self.api_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| ChannelError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ChannelError::Api {
                method: method.to_string(),
                detail,
            });
        }
        Ok(())
    }

    /// Send one sendMessage call with the given reply markup, splitting
    /// messages that exceed Telegram's character limit. The markup only goes
    /// on the last chunk.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: serde_json::Value,
    ) -> Result<(), ChannelError> {
        let chunks = split_message(text, TELEGRAM_MAX_MESSAGE_LENGTH);
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.iter().enumerate() {
            let mut body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
            });
            if i == last {
                body["reply_markup"] = reply_markup.clone();
            }
            self.post_json("sendMessage", body).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for TelegramChannel {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ChannelError> {
        self.send_message(
            chat_id,
            text,
            serde_json::json!({ "remove_keyboard": true }),
        )
        .await
    }

    async fn send_choices(
        &self,
        chat_id: i64,
        text: &str,
        choices: &[&str],
        placeholder: &str,
    ) -> Result<(), ChannelError> {
        self.send_message(
            chat_id,
            text,
            serde_json::json!({
                "keyboard": [choices],
                "one_time_keyboard": true,
                "resize_keyboard": true,
                "input_field_placeholder": placeholder,
            }),
        )
        .await
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<(), ChannelError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);

        let resp = self
            .client
            .post(self.api_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ChannelError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ChannelError::Api {
                method: "sendPhoto".into(),
                detail,
            });
        }
        tracing::info!(chat_id, "chart image sent: {filename}");
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), ChannelError> {
        self.post_json(
            "sendChatAction",
            serde_json::json!({ "chat_id": chat_id, "action": "typing" }),
        )
        .await
    }
}

/// Extract an [`Inbound`] from one getUpdates entry; non-text updates are
/// skipped.
fn parse_update(update: &serde_json::Value) -> Option<Inbound> {
    let message = update.get("message")?;
    let text = message.get("text").and_then(serde_json::Value::as_str)?;
    let chat_id = message
        .get("chat")
        .and_then(|c| c.get("id"))
        .and_then(serde_json::Value::as_i64)?;
    Some(Inbound::new(chat_id, text))
}

/// Split a message into chunks that fit Telegram's character limit.
/// Tries to split on newlines, then spaces, then hard-cuts.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        // max_len may land inside a multibyte character; back up to the
        // nearest boundary before slicing.
        let mut cut = max_len;
        while !remaining.is_char_boundary(cut) {
            cut -= 1;
        }

        let chunk = &remaining[..cut];
        let split_at = chunk
            .rfind('\n')
            .or_else(|| chunk.rfind(' '))
            .unwrap_or(cut);

        // Don't split at position 0 (infinite loop guard)
        let split_at = if split_at == 0 { cut } else { split_at };

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    chunks
}
