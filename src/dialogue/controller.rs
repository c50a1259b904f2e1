//! Dialogue controller — the state machine driving one conversation.
//!
//! Each inbound update is validated against the current stage; success
//! stores the field and advances, failure re-prompts the same stage. The
//! terminal collection stage hands the completed request to the reading
//! source and paces the delivery of the narrative, paragraph by paragraph.

use std::sync::Arc;

use super::prompts;
use super::session::ConversationSession;
use super::stage::Stage;
use super::validate;
use crate::channels::{Command, Inbound, Transport};
use crate::chart::cities;
use crate::config::Pacing;
use crate::logbook::Logbook;
use crate::orchestrator::ReadingSource;

/// Whether the session continues after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    End,
}

pub struct Dialogue {
    transport: Arc<dyn Transport>,
    readings: Arc<dyn ReadingSource>,
    logbook: Arc<Logbook>,
    pacing: Pacing,
}

impl Dialogue {
    pub fn new(
        transport: Arc<dyn Transport>,
        readings: Arc<dyn ReadingSource>,
        logbook: Arc<Logbook>,
        pacing: Pacing,
    ) -> Self {
        Self {
            transport,
            readings,
            logbook,
            pacing,
        }
    }

    /// Handle one inbound update for one session.
    ///
    /// Never returns an error: transport hiccups are logged and the
    /// conversation carries on; anything that must end the session still
    /// emits a user-visible message first.
    pub async fn handle(&self, session: &mut ConversationSession, update: &Inbound) -> Flow {
        let chat_id = session.chat_id;

        // Cancel wins from any stage, and the orchestrator is never invoked.
        if update.command == Some(Command::Cancel) {
            self.send(chat_id, prompts::FAREWELL).await;
            return Flow::End;
        }

        // First inbound unit is a trigger (command or free text): greet and
        // enter NAME without consuming it as an answer.
        if !session.greeted {
            session.greeted = true;
            session.stage = Stage::Name;
            self.send(chat_id, prompts::GREETING).await;
            return Flow::Continue;
        }

        // A /start mid-conversation just repeats the current question.
        if update.command == Some(Command::Start) {
            self.send(chat_id, session.stage.prompt()).await;
            return Flow::Continue;
        }

        let text = update.text.as_str();
        match session.stage {
            Stage::Name => match validate::name(text) {
                Some(name) => {
                    session.fields.name = Some(name);
                    self.advance(session, Stage::Year).await;
                }
                None => {
                    // Over-length gets the specific nudge; blank input gets
                    // the generic one.
                    let rebuke = if text.trim().chars().count() > validate::MAX_NAME_LEN {
                        prompts::NAME_TOO_LONG
                    } else {
                        session.stage.rebuke()
                    };
                    self.send(chat_id, rebuke).await;
                }
            },
            Stage::Year => match validate::year(text) {
                Some(year) => {
                    session.fields.year = Some(year);
                    self.advance(session, Stage::Month).await;
                }
                None => self.send(chat_id, session.stage.rebuke()).await,
            },
            Stage::Month => match validate::month(text) {
                Some(month) => {
                    session.fields.month = Some(month);
                    self.advance(session, Stage::Day).await;
                }
                None => self.send(chat_id, session.stage.rebuke()).await,
            },
            Stage::Day => match validate::day(text) {
                Some(day) => {
                    session.fields.day = Some(day);
                    self.advance(session, Stage::Time).await;
                }
                None => self.send(chat_id, session.stage.rebuke()).await,
            },
            Stage::Time => match validate::time(text) {
                Some((hour, minute)) => {
                    session.fields.hour = Some(hour);
                    session.fields.minute = Some(minute);
                    self.advance(session, Stage::Location).await;
                }
                None => self.send(chat_id, session.stage.rebuke()).await,
            },
            Stage::Location => match validate::location(text) {
                Some(location) => {
                    if let Some(code) = cities::country_for(&location) {
                        // Known city: infer the country, skip COUNTRY_CODE.
                        session.fields.location = Some(location);
                        session.fields.country_code = Some(code.to_string());
                        return self.deliver_reading(session).await;
                    }
                    session.fields.location = Some(location);
                    session.stage = Stage::CountryCode;
                    self.send(chat_id, Stage::CountryCode.prompt()).await;
                }
                None => self.send(chat_id, session.stage.rebuke()).await,
            },
            Stage::CountryCode => match validate::country_code(text) {
                Some(code) => {
                    session.fields.country_code = Some(code);
                    return self.deliver_reading(session).await;
                }
                None => self.send(chat_id, session.stage.rebuke()).await,
            },
            Stage::Repeat => {
                if validate::is_affirmative(text) {
                    session.fields.clear();
                    session.stage = Stage::Name;
                    self.send(chat_id, prompts::REPEAT_YES).await;
                } else {
                    self.send(chat_id, prompts::FAREWELL).await;
                    return Flow::End;
                }
            }
        }
        Flow::Continue
    }

    /// Generate and deliver one reading, then move to the repeat offer.
    async fn deliver_reading(&self, session: &mut ConversationSession) -> Flow {
        let chat_id = session.chat_id;

        let Some(request) = session.fields.complete() else {
            // Reaching generation with a hole in the fields is a controller
            // bug; still say goodbye instead of going silent.
            tracing::error!(chat_id, stage = %session.stage, "incomplete fields at generation");
            self.send(chat_id, prompts::CHART_FAILED).await;
            return Flow::End;
        };

        self.send(chat_id, prompts::CONSULTING).await;
        if let Err(e) = self.transport.send_typing(chat_id).await {
            tracing::debug!(chat_id, "typing indicator failed: {e}");
        }

        let reading = match self.readings.generate(&request).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::error!(chat_id, "chart generation failed: {e}");
                self.send(chat_id, prompts::CHART_FAILED).await;
                return Flow::End;
            }
        };

        self.send(
            chat_id,
            &format!("{}\n{}", prompts::CHART_HEADER, reading.chart_text),
        )
        .await;

        if let Some(bytes) = reading.image {
            if let Err(e) = self.transport.send_photo(chat_id, bytes, "carta.png").await {
                tracing::warn!(chat_id, "chart image not sent: {e}");
            }
        }

        self.send(chat_id, prompts::PREDICTION_HEADER).await;
        tokio::time::sleep(self.pacing.suspense).await;

        let narrative = match reading.narrative {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(chat_id, "substituting prediction fallback: {e}");
                prompts::PREDICTION_FALLBACK.to_string()
            }
        };

        // Collected up front: the send loop suspends between paragraphs and
        // the session future must stay Send across those awaits.
        let paragraphs: Vec<&str> = narrative
            .lines()
            .map(|line| line.trim())
            .filter(|p| !p.is_empty())
            .collect();
        for (i, paragraph) in paragraphs.iter().enumerate() {
            self.send(chat_id, paragraph).await;
            if i + 1 < paragraphs.len() {
                tokio::time::sleep(self.pacing.between_paragraphs).await;
            }
        }

        if let Err(e) = self.logbook.append(&request).await {
            tracing::warn!(chat_id, "interaction log append failed: {e}");
        }

        tokio::time::sleep(self.pacing.before_repeat_offer).await;
        if let Err(e) = self
            .transport
            .send_choices(
                chat_id,
                prompts::REPEAT_OFFER,
                &prompts::REPEAT_CHOICES,
                prompts::REPEAT_PLACEHOLDER,
            )
            .await
        {
            tracing::warn!(chat_id, "repeat offer failed: {e}");
        }
        session.stage = Stage::Repeat;
        Flow::Continue
    }

    /// Store-and-advance bookkeeping: enter the next stage and ask its
    /// question.
    async fn advance(&self, session: &mut ConversationSession, next: Stage) {
        session.stage = next;
        self.send(session.chat_id, next.prompt()).await;
    }

    /// Send a text message; a transport failure is logged, never fatal to
    /// the session.
    async fn send(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.transport.send_text(chat_id, text).await {
            tracing::warn!(chat_id, "send failed: {e}");
        }
    }
}
