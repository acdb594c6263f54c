//! Startup: config -> store -> dispatcher -> transport -> runtime.

use std::sync::Arc;

use paddock_core::{GameState, GameStore, Roster};
use paddock_race::{RaceDay, RaceSimulator};
use paddock_shared::ChatUser;

use crate::config::{Config, GameConfig};
use crate::error::BotResult;
use crate::events::EventBus;
use crate::handlers::Dispatcher;
use crate::runtime::{spawn_signal_listener, Runtime, Shutdown, StopReason};
use crate::transport::console::CONSOLE_CHAT;
use crate::transport::{ChatTransport, ConsoleTransport, TelegramTransport};

/// Which transport to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportKind {
    /// Telegram long polling.
    Telegram,
    /// stdin/stdout.
    Console,
}

/// Seeds the game state from the configured roster, or the built-in one.
///
/// # Errors
///
/// The roster file cannot be read or fails validation.
pub fn initial_state(game: &GameConfig) -> BotResult<GameState> {
    let roster = match &game.roster_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading roster");
            Roster::load(path)?
        }
        None => Roster::builtin()?,
    };
    Ok(roster.into_state()?)
}

/// Race simulator from the configured seed, or OS entropy.
#[must_use]
pub fn simulator(game: &GameConfig) -> RaceSimulator {
    match game.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "races are seeded");
            RaceSimulator::seeded(seed)
        }
        None => RaceSimulator::from_entropy(),
    }
}

/// Runs the bot until shutdown.
///
/// # Errors
///
/// Startup failures only: bad roster, missing token, HTTP client setup.
pub async fn run(config: Config, kind: TransportKind) -> BotResult<StopReason> {
    let store = Arc::new(GameStore::new(initial_state(&config.game)?));
    {
        let state = store.read();
        tracing::info!(
            horses = state.horses().count(),
            tracks = state.list_tracks().len(),
            "stable ready"
        );
    }

    let bus = EventBus::default();
    let dispatcher = Arc::new(Dispatcher::new(
        store,
        simulator(&config.game),
        RaceDay::new(config.game.max_field, config.game.purse.clone()),
        bus.sender(),
    ));

    let shutdown = Arc::new(Shutdown::new());
    let signals = spawn_signal_listener(Arc::clone(&shutdown));
    let retry_delay = config.telegram.poll_interval();

    let reason = match kind {
        TransportKind::Telegram => {
            let transport = TelegramTransport::new(&config.telegram)?;
            drive(transport, dispatcher, bus, shutdown, retry_delay).await
        }
        TransportKind::Console => {
            let user = ChatUser {
                id: CONSOLE_CHAT,
                display_name: "console".to_owned(),
            };
            let transport = ConsoleTransport::stdio(user);
            drive(transport, dispatcher, bus, shutdown, retry_delay).await
        }
    };

    signals.abort();
    Ok(reason)
}

async fn drive<T: ChatTransport>(
    transport: T,
    dispatcher: Arc<Dispatcher>,
    bus: EventBus,
    shutdown: Arc<Shutdown>,
    retry_delay: std::time::Duration,
) -> StopReason {
    Runtime::new(transport, dispatcher, bus.receiver(), shutdown, retry_delay)
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_builtin_roster_when_no_path() {
        let state = initial_state(&GameConfig::default()).unwrap();
        assert_eq!(state.horses().count(), 8);
        assert_eq!(state.list_tracks().len(), 4);
    }

    #[test]
    fn test_missing_roster_file_is_a_startup_error() {
        let game = GameConfig {
            roster_path: Some(PathBuf::from("no/such/roster.toml")),
            ..GameConfig::default()
        };
        assert!(initial_state(&game).is_err());
    }

    #[test]
    fn test_shipped_example_files_load() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
        let config = Config::load(&root.join("paddock.example.toml")).unwrap();
        assert_eq!(config, Config::default());

        let game = GameConfig {
            roster_path: Some(root.join("roster.example.toml")),
            ..GameConfig::default()
        };
        let state = initial_state(&game).unwrap();
        assert_eq!(state.horses().count(), 4);
        assert_eq!(state.list_tracks().len(), 2);
    }

    #[test]
    fn test_seeded_simulators_agree() {
        let game = GameConfig {
            rng_seed: Some(5),
            ..GameConfig::default()
        };
        let state = initial_state(&game).unwrap();
        let entrants: Vec<_> = state.horses().collect();
        let track = state.list_tracks()[0];
        let jockeys = paddock_race::JockeyAssignments::new();
        assert_eq!(
            simulator(&game).run(&entrants, track, &jockeys),
            simulator(&game).run(&entrants, track, &jockeys)
        );
    }
}
