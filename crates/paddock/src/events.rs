//! # Game Events
//!
//! Non-blocking notifications from the command handlers to the runtime.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ Dispatcher  │─────>│   Event     │─────>│   Runtime   │
//! │ (handlers)  │      │   Channel   │      │  (logging)  │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Handlers never wait on the bus: a full channel drops the event.

use chrono::NaiveDate;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use paddock_shared::{Role, UserId};

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Something that changed the game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    // =========================================================================
    // Enrollment
    // =========================================================================
    /// A user picked a role.
    PlayerJoined {
        /// The new player.
        user_id: UserId,
        /// Their role.
        role: Role,
    },

    /// An owner received a starter horse.
    HorseGranted {
        /// The owner.
        user_id: UserId,
        /// The horse.
        horse: String,
    },

    /// A track owner received a starter track.
    TrackGranted {
        /// The track owner.
        user_id: UserId,
        /// The track.
        track: String,
    },

    // =========================================================================
    // Racing
    // =========================================================================
    /// A jockey booked a ride.
    JockeyBooked {
        /// The jockey.
        user_id: UserId,
        /// The horse.
        horse: String,
    },

    /// The day's race was run.
    RaceRun {
        /// Race date.
        date: NaiveDate,
        /// Track raced on.
        track: String,
        /// Winning horse.
        winner: String,
        /// Number of runners.
        runners: usize,
    },
}

/// A bounded channel of [`GameEvent`]s.
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undrained events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Handle for publishing events.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<GameEvent>,
}

impl EventSender {
    /// Publishes an event without blocking.
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "event bus full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for consuming events.
#[derive(Clone, Debug)]
pub struct EventReceiver {
    receiver: Receiver<GameEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[must_use]
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
