//! # Race Day
//!
//! One race per calendar day:
//!
//! ```text
//! gate open? ─> eligible (form > 5) >= 4? ─> any track? ─> draw track + field
//!     ─> book jockeys ─> simulate ─> close gate ─> settle
//! ```
//!
//! [`RaceDay::run`] takes `&mut GameState`; callers hold the store's write
//! guard for the whole call so a day's race cannot run twice.

use chrono::NaiveDate;
use paddock_core::{GameState, Horse, Track};
use paddock_shared::constants::{
    DEFAULT_MAX_FIELD, DEFAULT_PURSE, ELIGIBLE_FORM_THRESHOLD, EXPERIENCE_PER_PLACING,
    MIN_FIELD_SIZE,
};
use paddock_shared::UserId;
use rand::seq::SliceRandom;

use crate::error::{RaceDayError, RaceDayResult};
use crate::simulator::{JockeyAssignments, RaceOutcome, RaceSimulator};

/// Prize money paid for one placing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payout {
    /// Finishing position, 1-based.
    pub position: usize,
    /// Horse name.
    pub horse: String,
    /// Owner credited, `None` if the horse has no owner.
    pub owner: Option<UserId>,
    /// Purse for the placing.
    pub amount: u64,
}

/// Everything that happened in a day's race.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceCard {
    /// Race date.
    pub date: NaiveDate,
    /// Where it was run.
    pub track: Track,
    /// Number of runners.
    pub field_size: usize,
    /// Finishing order.
    pub outcome: RaceOutcome,
    /// Purse paid out, winner first.
    pub payouts: Vec<Payout>,
}

impl RaceCard {
    /// Money actually credited to owners.
    #[must_use]
    pub fn purse_paid(&self) -> u64 {
        self.payouts
            .iter()
            .filter(|p| p.owner.is_some())
            .map(|p| p.amount)
            .sum()
    }
}

/// Race-day rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceDay {
    /// Largest field drawn. Never below the minimum field size.
    pub max_field: usize,
    /// Purse per placing, winner first.
    pub purse: Vec<u64>,
    /// Experience for a booked jockey who places.
    pub experience_per_placing: u64,
}

impl Default for RaceDay {
    fn default() -> Self {
        Self {
            max_field: DEFAULT_MAX_FIELD,
            purse: DEFAULT_PURSE.to_vec(),
            experience_per_placing: EXPERIENCE_PER_PLACING,
        }
    }
}

impl RaceDay {
    /// Rules with a custom field limit and purse.
    #[must_use]
    pub fn new(max_field: usize, purse: Vec<u64>) -> Self {
        Self {
            max_field: max_field.max(MIN_FIELD_SIZE),
            purse,
            ..Self::default()
        }
    }

    /// Horses fit to race today, by name.
    #[must_use]
    pub fn eligible(state: &GameState) -> Vec<&Horse> {
        state
            .horses()
            .filter(|h| h.stats.form > ELIGIBLE_FORM_THRESHOLD)
            .collect()
    }

    /// Runs and settles today's race.
    ///
    /// # Errors
    ///
    /// [`RaceDayError::AlreadyRunToday`], [`RaceDayError::NotEnoughRunners`]
    /// or [`RaceDayError::NoTracks`] leave the state untouched.
    pub fn run(
        &self,
        state: &mut GameState,
        today: NaiveDate,
        simulator: &mut RaceSimulator,
    ) -> RaceDayResult<RaceCard> {
        if !state.can_run_daily_race(today) {
            return Err(RaceDayError::AlreadyRunToday(today));
        }

        let (track, outcome) = {
            let eligible = Self::eligible(state);
            if eligible.len() < MIN_FIELD_SIZE {
                return Err(RaceDayError::NotEnoughRunners {
                    eligible: eligible.len(),
                    required: MIN_FIELD_SIZE,
                });
            }

            let tracks = state.list_tracks();
            let track = tracks
                .choose(simulator.rng_mut())
                .copied()
                .ok_or(RaceDayError::NoTracks)?;

            let field_size = self.max_field.max(MIN_FIELD_SIZE).min(eligible.len());
            let field: Vec<&Horse> = eligible
                .choose_multiple(simulator.rng_mut(), field_size)
                .copied()
                .collect();

            let jockeys: JockeyAssignments<'_> = field
                .iter()
                .filter_map(|h| state.jockey_for(&h.name).map(|j| (h.name.as_str(), j)))
                .collect();

            (track.clone(), simulator.run(&field, track, &jockeys))
        };

        state.mark_daily_race_run(today);
        let payouts = self.settle(state, &outcome)?;

        tracing::info!(
            %today,
            track = %track.name,
            runners = outcome.results.len(),
            winner = outcome.winner().map_or("-", |w| w.horse.as_str()),
            "race run"
        );

        Ok(RaceCard {
            date: today,
            field_size: outcome.results.len(),
            track,
            outcome,
            payouts,
        })
    }

    fn settle(&self, state: &mut GameState, outcome: &RaceOutcome) -> RaceDayResult<Vec<Payout>> {
        for result in &outcome.results {
            state.record_start(&result.horse, result.position == 1)?;
        }

        let mut payouts = Vec::with_capacity(self.purse.len());
        for (result, &amount) in outcome.podium().iter().zip(&self.purse) {
            let owner = state.get_horse(&result.horse).and_then(|h| h.owner);
            if let Some(owner) = owner {
                state.credit_player(owner, amount)?;
            }
            if let Some(jockey) = result.jockey_id {
                state.award_experience(jockey, self.experience_per_placing)?;
            }
            payouts.push(Payout {
                position: result.position,
                horse: result.horse.clone(),
                owner,
                amount,
            });
        }
        Ok(payouts)
    }
}
