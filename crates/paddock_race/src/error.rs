//! # Race Day Errors

use chrono::NaiveDate;
use paddock_core::CoreError;
use thiserror::Error;

/// Why a race could not be run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaceDayError {
    /// Today's race has already been run.
    #[error("the race for {0} has already been run")]
    AlreadyRunToday(NaiveDate),

    /// Too few horses are fit to race.
    #[error("only {eligible} eligible horses, at least {required} required")]
    NotEnoughRunners {
        /// Horses with enough form.
        eligible: usize,
        /// Minimum field size.
        required: usize,
    },

    /// There is nowhere to race.
    #[error("no tracks available")]
    NoTracks,

    /// Settlement hit an inconsistent store.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for race-day operations.
pub type RaceDayResult<T> = Result<T, RaceDayError>;
