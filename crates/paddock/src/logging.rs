//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over `log.level`:
//!
//! ```bash
//! RUST_LOG=paddock=debug,paddock_race=info paddock_bot --console
//! ```

use tracing_subscriber::filter::EnvFilter;

use crate::config::{LogConfig, LogFormat};
use crate::error::{BotError, BotResult};

/// Builds the filter: `RUST_LOG` if set, else the configured level with the
/// HTTP stack quietened.
///
/// # Errors
///
/// [`BotError::Logging`] if the configured level is not a valid directive.
pub fn build_filter(config: &LogConfig) -> BotResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = format!("{},hyper=warn,reqwest=warn", config.level);
    EnvFilter::try_new(&directives).map_err(|e| BotError::Logging(e.to_string()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// [`BotError::Logging`] for a bad level or if a subscriber is already set.
pub fn init(config: &LogConfig) -> BotResult<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.with_target(false).try_init(),
    };
    installed.map_err(|e| BotError::Logging(e.to_string()))
}
