//! # PADDOCK Bot
//!
//! ```bash
//! # Telegram, token from the environment
//! PADDOCK_BOT_TOKEN=123:abc paddock_bot --config paddock.toml
//!
//! # Local play in the terminal
//! paddock_bot --console
//! ```
//!
//! Exit code 0 on a clean shutdown, 1 if startup fails.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use paddock::config::{Config, DEFAULT_CONFIG_PATH};
use paddock::{logging, TransportKind};

/// Horse racing game bot.
#[derive(Debug, Parser)]
#[command(name = "paddock_bot", version, about)]
struct Cli {
    /// Config file (default: paddock.toml, if present).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Play in the terminal instead of connecting to Telegram.
    #[arg(long)]
    console: bool,
}

fn load_config(cli: &Cli) -> paddock::BotResult<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    Ok(config.with_env())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("paddock_bot: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(&config.log) {
        eprintln!("paddock_bot: {e}");
        return ExitCode::FAILURE;
    }

    let kind = if cli.console {
        TransportKind::Console
    } else {
        TransportKind::Telegram
    };
    tracing::info!(version = env!("CARGO_PKG_VERSION"), ?kind, "paddock bot starting");

    match paddock::app::run(config, kind).await {
        Ok(reason) => {
            tracing::info!(?reason, "paddock bot shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "paddock bot failed to start");
            ExitCode::FAILURE
        }
    }
}
