//! # PADDOCK Shared
//!
//! Common types used by the store, the simulator and the bot.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - an async runtime
//! - an HTTP client
//! - anything that talks to a chat platform
//!
//! Transport code belongs in the `paddock` crate.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod kinds;
pub mod protocol;

pub use constants::{MARKET_PAGE_SIZE, MIN_FIELD_SIZE};
pub use kinds::{DistanceBand, Role, Surface, TrackCondition, UnknownKind};
pub use protocol::{Button, Callback, ChatId, ChatUser, Command, Inbound, Outbound, Payload, UserId};
