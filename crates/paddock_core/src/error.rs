//! # Core Error Types
//!
//! All errors that can occur while reading or mutating the game state.

use paddock_shared::{Role, UserId};
use thiserror::Error;

/// Errors that can occur in the game state store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A horse or track attribute is outside its allowed range.
    #[error("{field} of {subject} must be within {min}..={max}, got {value}")]
    StatOutOfRange {
        /// Horse or track name.
        subject: String,
        /// The attribute that failed validation.
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },

    /// A horse record claims more wins than races.
    #[error("{horse} has {wins} wins from only {races} races")]
    ImpossibleRecord {
        /// The horse.
        horse: String,
        /// Recorded wins.
        wins: u32,
        /// Recorded races.
        races: u32,
    },

    /// No horse with this name.
    #[error("unknown horse: {0}")]
    UnknownHorse(String),

    /// No track with this name.
    #[error("unknown track: {0}")]
    UnknownTrack(String),

    /// No player with this id.
    #[error("unknown player: {0}")]
    UnknownPlayer(UserId),

    /// A horse or track with this name already exists.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// The user already joined the game.
    #[error("player {user_id} already registered as {role}")]
    AlreadyRegistered {
        /// The user.
        user_id: UserId,
        /// The role they joined with.
        role: Role,
    },

    /// The horse or track already has an owner.
    #[error("{0} already has an owner")]
    AlreadyOwned(String),

    /// Only jockeys can book rides.
    #[error("player {user_id} is a {role}, not a jockey")]
    NotAJockey {
        /// The player.
        user_id: UserId,
        /// Their actual role.
        role: Role,
    },

    /// Another jockey already holds the ride on this horse.
    #[error("the ride on {horse} is already booked by player {jockey}")]
    RideTaken {
        /// The horse.
        horse: String,
        /// The jockey holding the booking.
        jockey: UserId,
    },

    /// A horse name too long to carry in a button payload.
    #[error("horse name {name:?} is {len} bytes, at most {max} allowed")]
    NameTooLong {
        /// The rejected name.
        name: String,
        /// Its length in bytes.
        len: usize,
        /// The limit.
        max: usize,
    },

    /// A roster file could not be read or parsed.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
}

/// Result type for store operations.
pub type CoreResult<T> = Result<T, CoreError>;
