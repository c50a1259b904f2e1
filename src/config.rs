//! Process-wide configuration, loaded once at startup from the environment.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default chat-completions model.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Default chart column width. Lines containing the separator are truncated
/// to this many characters so the chart stays legible on a phone screen.
const DEFAULT_REPORT_WIDTH: usize = 57;

/// Bot configuration. Immutable after startup; passed explicitly to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,
    /// OpenAI API key.
    pub openai_api_key: SecretString,
    /// Chat-completions model name.
    pub model: String,
    /// External chart-computation command (receives the birth facts as argv).
    pub chart_command: String,
    /// Whether to ask the chart command for a rendered image.
    pub chart_image: bool,
    /// Path of the append-only interaction log.
    pub log_path: PathBuf,
    /// Maximum column width for formatted chart lines.
    pub report_width: usize,
    /// Message pacing.
    pub pacing: Pacing,
}

/// Delays between outbound messages during reading delivery.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Pause after announcing the prediction, before the first paragraph.
    pub suspense: Duration,
    /// Pause between consecutive prediction paragraphs.
    pub between_paragraphs: Duration,
    /// Pause after the last paragraph, before offering another reading.
    pub before_repeat_offer: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            suspense: Duration::from_secs(2),
            between_paragraphs: Duration::from_secs(7),
            before_repeat_offer: Duration::from_secs(10),
        }
    }
}

impl Pacing {
    /// Zero delays, for tests.
    pub fn none() -> Self {
        Self {
            suspense: Duration::ZERO,
            between_paragraphs: Duration::ZERO,
            before_repeat_offer: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `TELEGRAM_BOT_TOKEN` and `OPENAI_API_KEY` are required; everything
    /// else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = require_env("TELEGRAM_BOT_TOKEN")?;
        let openai_api_key = SecretString::from(require_env("OPENAI_API_KEY")?);

        let model = std::env::var("MIRALUNAS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let chart_command = std::env::var("MIRALUNAS_CHART_CMD")
            .unwrap_or_else(|_| "kerykeion-report".to_string());
        let chart_image = std::env::var("MIRALUNAS_CHART_IMAGE")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let log_path = std::env::var("MIRALUNAS_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./usuarios.txt"));
        let report_width = parse_env("MIRALUNAS_REPORT_WIDTH", DEFAULT_REPORT_WIDTH)?;

        let pacing = Pacing {
            suspense: Duration::from_secs(parse_env("MIRALUNAS_SUSPENSE_SECS", 2u64)?),
            between_paragraphs: Duration::from_secs(parse_env("MIRALUNAS_PARAGRAPH_SECS", 7u64)?),
            before_repeat_offer: Duration::from_secs(parse_env("MIRALUNAS_REPEAT_SECS", 10u64)?),
        };

        Ok(Self {
            bot_token,
            openai_api_key,
            model,
            chart_command,
            chart_image,
            log_path,
            report_width,
            pacing,
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("could not parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_defaults_match_observed_values() {
        let pacing = Pacing::default();
        assert_eq!(pacing.suspense, Duration::from_secs(2));
        assert_eq!(pacing.between_paragraphs, Duration::from_secs(7));
        assert_eq!(pacing.before_repeat_offer, Duration::from_secs(10));
    }

    #[test]
    fn pacing_none_is_zero() {
        let pacing = Pacing::none();
        assert_eq!(pacing.suspense, Duration::ZERO);
        assert_eq!(pacing.between_paragraphs, Duration::ZERO);
        assert_eq!(pacing.before_repeat_offer, Duration::ZERO);
    }
}
