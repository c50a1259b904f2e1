//! Message transport abstraction.

pub mod telegram;

pub use telegram::TelegramChannel;

use async_trait::async_trait;

use crate::error::ChannelError;

/// Command-style triggers, recognized by the transport from the leading `/`
/// convention. The controller never parses command syntax itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Cancel,
}

/// One inbound unit of user text.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub chat_id: i64,
    pub text: String,
    pub command: Option<Command>,
}

impl Inbound {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        let text = text.into();
        let command = classify_command(&text);
        Self {
            chat_id,
            text,
            command,
        }
    }
}

/// Classify a leading-`/` trigger. Unknown commands count as start triggers,
/// so `/help` on a dead conversation still wakes the bot up.
fn classify_command(text: &str) -> Option<Command> {
    let rest = text.trim().strip_prefix('/')?;
    let word = rest
        .split(|c: char| c.is_whitespace() || c == '@')
        .next()
        .unwrap_or("");
    match word.to_lowercase().as_str() {
        "cancel" => Some(Command::Cancel),
        _ => Some(Command::Start),
    }
}

/// Outbound reply sink. Implemented by [`TelegramChannel`] in production and
/// by mocks in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send plain text (removes any reply keyboard).
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ChannelError>;

    /// Send text with a one-time quick-reply keyboard.
    async fn send_choices(
        &self,
        chat_id: i64,
        text: &str,
        choices: &[&str],
        placeholder: &str,
    ) -> Result<(), ChannelError>;

    /// Send an image from bytes.
    async fn send_photo(
        &self,
        chat_id: i64,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<(), ChannelError>;

    /// Best-effort typing indicator.
    async fn send_typing(&self, chat_id: i64) -> Result<(), ChannelError>;
}
