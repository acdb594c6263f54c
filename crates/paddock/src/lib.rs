//! # PADDOCK Bot
//!
//! Chat front end for the horse racing game.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  Inbound   ┌────────────┐  &mut GameState  ┌────────────┐
//! │ Transport  │───────────>│ Dispatcher │─────────────────>│ GameStore  │
//! │ (telegram, │<───────────│ (handlers) │                  │  RwLock    │
//! │  console)  │  Outbound  └─────┬──────┘                  └────────────┘
//! └────────────┘                  │ GameEvent
//!                                 v
//!                           ┌────────────┐
//!                           │  Runtime   │──> tracing
//!                           └────────────┘
//! ```
//!
//! The runtime is a single task: poll, dispatch to completion, reply, repeat.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod handlers;
pub mod logging;
pub mod runtime;
pub mod transport;

pub use app::TransportKind;
pub use config::Config;
pub use error::{BotError, BotResult, TransportError};
pub use events::{EventBus, GameEvent};
pub use handlers::Dispatcher;
pub use runtime::{Runtime, Shutdown, StopReason};
pub use transport::ChatTransport;
