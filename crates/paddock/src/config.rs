//! # Bot Configuration
//!
//! Loaded once at startup from a TOML file. Every section and key is
//! optional:
//!
//! ```toml
//! [telegram]
//! token = ""
//! api_base = "https://api.telegram.org"
//! poll_timeout_secs = 10
//! poll_interval_ms = 1000
//! request_timeout_secs = 10
//!
//! [game]
//! roster_path = "roster.toml"
//! rng_seed = 42
//! max_field = 8
//! purse = [5000, 2500, 1000]
//!
//! [log]
//! level = "info"
//! format = "pretty"
//! ```
//!
//! `PADDOCK_BOT_TOKEN` overrides `telegram.token`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use paddock_shared::constants::{DEFAULT_MAX_FIELD, DEFAULT_PURSE, MIN_FIELD_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "PADDOCK_BOT_TOKEN";

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "paddock.toml";

/// Paid placings.
const MAX_PURSE_PLACES: usize = 3;

/// Telegram Bot API settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token. Prefer the environment variable.
    pub token: String,
    /// API root, without a trailing slash.
    pub api_base: String,
    /// Long-poll timeout passed to `getUpdates`.
    pub poll_timeout_secs: u64,
    /// Back-off between failed polls.
    pub poll_interval_ms: u64,
    /// Connect/read/write timeout on top of the long poll.
    pub request_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: "https://api.telegram.org".to_owned(),
            poll_timeout_secs: 10,
            poll_interval_ms: 1_000,
            request_timeout_secs: 10,
        }
    }
}

impl TelegramConfig {
    /// Back-off between failed polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Whole-request HTTP timeout: the long poll plus the request timeout.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs.saturating_add(self.request_timeout_secs))
    }
}

/// Game rules and seeding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Roster file; the built-in roster when absent.
    pub roster_path: Option<PathBuf>,
    /// Fixed race seed; OS entropy when absent.
    pub rng_seed: Option<u64>,
    /// Largest race field.
    pub max_field: usize,
    /// Purse per placing, winner first.
    pub purse: Vec<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            rng_seed: None,
            max_field: DEFAULT_MAX_FIELD,
            purse: DEFAULT_PURSE.to_vec(),
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, multi-field.
    #[default]
    Pretty,
    /// Single line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter; `RUST_LOG` wins when set.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

/// Complete bot configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[telegram]`
    pub telegram: TelegramConfig,
    /// `[game]`
    pub game: GameConfig,
    /// `[log]`
    pub log: LogConfig,
}

impl Config {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// [`BotError::ConfigParse`] or [`BotError::ConfigInvalid`].
    pub fn from_toml_str(text: &str, origin: &Path) -> BotResult<Self> {
        let config: Self = toml::from_str(text).map_err(|source| BotError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file that must exist.
    ///
    /// # Errors
    ///
    /// [`BotError::ConfigIo`] if the file cannot be read, or any
    /// [`Config::from_toml_str`] error.
    pub fn load(path: &Path) -> BotResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| BotError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Reads a config file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// As [`Config::load`], except for a missing file.
    pub fn load_or_default(path: &Path) -> BotResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Replaces the token with `token`, if present and non-empty.
    #[must_use]
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.telegram.token = token.trim().to_owned();
        }
        self
    }

    /// Applies [`TOKEN_ENV`].
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_token_override(std::env::var(TOKEN_ENV).ok())
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// [`BotError::ConfigInvalid`] naming the offending key.
    pub fn validate(&self) -> BotResult<()> {
        if self.game.max_field < MIN_FIELD_SIZE {
            return Err(BotError::ConfigInvalid(format!(
                "game.max_field must be at least {MIN_FIELD_SIZE}, got {}",
                self.game.max_field
            )));
        }
        if self.game.purse.len() > MAX_PURSE_PLACES {
            return Err(BotError::ConfigInvalid(format!(
                "game.purse pays at most {MAX_PURSE_PLACES} places, got {}",
                self.game.purse.len()
            )));
        }
        if self.telegram.api_base.trim().is_empty() {
            return Err(BotError::ConfigInvalid("telegram.api_base is empty".to_owned()));
        }
        if self.telegram.poll_interval_ms == 0 {
            return Err(BotError::ConfigInvalid(
                "telegram.poll_interval_ms must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
