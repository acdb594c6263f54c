//! # Bot Error Types

use std::path::PathBuf;

use paddock_core::CoreError;
use thiserror::Error;

/// Failures talking to a chat platform.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP request itself failed. The request URL is stripped, since it
    /// carries the bot token.
    #[error("http request failed: {0}")]
    Http(reqwest::Error),

    /// The API answered `ok: false`.
    #[error("api error {code}: {description}")]
    Api {
        /// Platform error code, 0 when absent.
        code: i64,
        /// Platform description.
        description: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local I/O failed (console transport).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// No bot token configured.
    #[error("no bot token: set PADDOCK_BOT_TOKEN or telegram.token")]
    MissingToken,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// Errors that stop the bot or a single update.
#[derive(Error, Debug)]
pub enum BotError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this bot.
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    /// The config parsed but holds impossible values.
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// The logging subscriber could not be installed.
    #[error("cannot initialise logging: {0}")]
    Logging(String),

    /// Transport failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Game store failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for bot operations.
pub type BotResult<T> = Result<T, BotError>;
