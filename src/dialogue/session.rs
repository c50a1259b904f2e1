//! Per-conversation state and the session store.
//!
//! One task per conversation: the store maps a chat id to an mpsc sender,
//! and the spawned task drains that channel strictly sequentially, pacing
//! delays included. Independent conversations never block each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use super::controller::{Dialogue, Flow};
use super::stage::Stage;
use crate::channels::Inbound;
use crate::chart::ChartRequest;

/// Birth facts accumulated across collection stages.
///
/// A field is set at most once per chart request; the only way to change one
/// is the repeat loop, which clears everything.
#[derive(Debug, Default, Clone)]
pub struct BirthFields {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub location: Option<String>,
    pub country_code: Option<String>,
}

impl BirthFields {
    /// Assemble the immutable chart request, if every field is present.
    pub fn complete(&self) -> Option<ChartRequest> {
        Some(ChartRequest {
            name: self.name.clone()?,
            year: self.year?,
            month: self.month?,
            day: self.day?,
            hour: self.hour?,
            minute: self.minute?,
            location: self.location.clone()?,
            country_code: self.country_code.clone()?,
        })
    }

    /// Forget everything: the repeat loop starts a brand-new subject.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One active conversation.
#[derive(Debug)]
pub struct ConversationSession {
    pub chat_id: i64,
    pub stage: Stage,
    pub fields: BirthFields,
    /// Whether the greeting was already sent. The first inbound unit of a
    /// session is a trigger, not an answer.
    pub greeted: bool,
}

impl ConversationSession {
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            stage: Stage::Name,
            fields: BirthFields::default(),
            greeted: false,
        }
    }
}

/// Maps chat ids to live session tasks and routes inbound updates.
pub struct SessionStore {
    dialogue: Arc<Dialogue>,
    sessions: Mutex<HashMap<i64, mpsc::UnboundedSender<Inbound>>>,
}

impl SessionStore {
    pub fn new(dialogue: Arc<Dialogue>) -> Self {
        Self {
            dialogue,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Route one inbound update to its session, spawning a fresh session
    /// task if the conversation is new or has already ended.
    pub async fn dispatch(&self, update: Inbound) {
        let chat_id = update.chat_id;
        let mut sessions = self.sessions.lock().await;

        let update = match sessions.get(&chat_id) {
            Some(tx) => match tx.send(update) {
                Ok(()) => return,
                // Session task ended; recover the update and start over.
                Err(mpsc::error::SendError(update)) => update,
            },
            None => update,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        // Fresh channel, send cannot fail.
        let _ = tx.send(update);
        sessions.insert(chat_id, tx);
        tokio::spawn(run_session(Arc::clone(&self.dialogue), chat_id, rx));
    }

    /// Number of session entries (live or finished-but-unreaped).
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

/// Drive one conversation to completion. Strictly sequential within the
/// session: the next update is not taken until the previous one, pacing and
/// all, has been handled.
async fn run_session(
    dialogue: Arc<Dialogue>,
    chat_id: i64,
    mut rx: mpsc::UnboundedReceiver<Inbound>,
) {
    let mut session = ConversationSession::new(chat_id);
    tracing::debug!(chat_id, "session started");
    while let Some(update) = rx.recv().await {
        match dialogue.handle(&mut session, &update).await {
            Flow::Continue => {}
            Flow::End => break,
        }
    }
    tracing::debug!(chat_id, "session ended");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_fields() -> BirthFields {
        BirthFields {
            name: Some("Ana".into()),
            year: Some(1990),
            month: Some(7),
            day: Some(15),
            hour: Some(14),
            minute: Some(30),
            location: Some("madrid".into()),
            country_code: Some("ES".into()),
        }
    }

    #[test]
    fn incomplete_fields_produce_no_request() {
        let mut fields = full_fields();
        fields.country_code = None;
        assert!(fields.complete().is_none());
        assert!(BirthFields::default().complete().is_none());
    }

    #[test]
    fn complete_fields_produce_the_request() {
        let request = full_fields().complete().unwrap();
        assert_eq!(request.name, "Ana");
        assert_eq!(request.year, 1990);
        assert_eq!(request.country_code, "ES");
    }

    #[test]
    fn clear_forgets_everything() {
        let mut fields = full_fields();
        fields.clear();
        assert!(fields.name.is_none());
        assert!(fields.complete().is_none());
    }

    #[test]
    fn new_session_starts_ungreeted_at_name() {
        let session = ConversationSession::new(42);
        assert_eq!(session.stage, Stage::Name);
        assert!(!session.greeted);
    }
}
