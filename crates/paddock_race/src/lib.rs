//! # PADDOCK Race
//!
//! The starting gate: who runs, who wins, who gets paid.
//!
//! ## Layers
//!
//! - [`scoring`]: the score model, one term per function
//! - [`simulator`]: scores a field and sorts it; pure given a [`LuckSource`]
//! - [`meeting`]: the daily race, from eligibility to settlement
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use paddock_core::Roster;
//! use paddock_race::{RaceDay, RaceSimulator};
//!
//! let mut state = Roster::builtin()?.into_state()?;
//! let today = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
//! let mut simulator = RaceSimulator::seeded(42);
//!
//! let card = RaceDay::default().run(&mut state, today, &mut simulator)?;
//! assert!(card.outcome.winner().is_some());
//! assert!(!state.can_run_daily_race(today));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod meeting;
pub mod scoring;
pub mod simulator;

pub use error::{RaceDayError, RaceDayResult};
pub use meeting::{Payout, RaceCard, RaceDay};
pub use scoring::ScoreBreakdown;
pub use simulator::{
    simulate, JockeyAssignments, LuckSource, NoLuck, RaceOutcome, RaceResult, RaceSimulator,
    UniformLuck,
};
