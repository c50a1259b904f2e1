//! Miralunas — Telegram astrology reading bot.
//!
//! Collects birth data through a guided dialogue, derives a chart via an
//! external computation command, and paces an LLM-written reading back to
//! the user.

pub mod channels;
pub mod chart;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod llm;
pub mod logbook;
pub mod orchestrator;
