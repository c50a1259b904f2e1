//! Error types for Miralunas. Each concern carries its own enum; the few
//! places that mix them use `anyhow` at the binary edge.

/// Configuration-related errors. All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Telegram transport errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Telegram request failed: {0}")]
    Http(String),

    #[error("Telegram API rejected {method}: {detail}")]
    Api { method: String, detail: String },
}

/// Chart computation errors. Any of these ends the conversation.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart command failed: {0}")]
    Command(String),

    #[error("chart report is missing the '{marker}' marker")]
    MarkerNotFound { marker: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Prediction (text-generation) errors.
///
/// These never end the conversation: the controller substitutes a fallback
/// text and continues to the repeat offer.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion response had an unexpected shape: {0}")]
    Shape(String),

    #[error("unexpected prediction failure: {0}")]
    Unknown(String),
}
