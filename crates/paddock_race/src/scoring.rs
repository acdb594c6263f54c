//! # Score Model
//!
//! ```text
//! score = 0.4*speed + 0.3*stamina + 0.2*acceleration + 0.1*form   (base)
//!       + 5   if surface preference == track surface               (surface)
//!       + 3   if distance preference == track band                 (distance)
//!       + 2*jockey.level + 0.1*jockey.reputation                   (jockey)
//!       + U[-10, 10]                                               (luck)
//! ```

use paddock_core::{Horse, Player, Stats, Track};
use paddock_shared::constants::{
    ACCELERATION_WEIGHT, DISTANCE_MATCH_BONUS, FORM_WEIGHT, JOCKEY_LEVEL_WEIGHT,
    JOCKEY_REPUTATION_WEIGHT, SPEED_WEIGHT, STAMINA_WEIGHT, SURFACE_MATCH_BONUS,
};

/// Weighted sum of a horse's stats.
#[must_use]
pub fn base_score(stats: &Stats) -> f64 {
    SPEED_WEIGHT * f64::from(stats.speed)
        + STAMINA_WEIGHT * f64::from(stats.stamina)
        + ACCELERATION_WEIGHT * f64::from(stats.acceleration)
        + FORM_WEIGHT * f64::from(stats.form)
}

/// +5 when the horse likes the track's surface.
#[must_use]
pub fn surface_bonus(horse: &Horse, track: &Track) -> f64 {
    if horse.surface_preference == track.surface {
        SURFACE_MATCH_BONUS
    } else {
        0.0
    }
}

/// +3 when the horse likes the track's distance band.
#[must_use]
pub fn distance_bonus(horse: &Horse, track: &Track) -> f64 {
    if horse.distance_preference == track.band() {
        DISTANCE_MATCH_BONUS
    } else {
        0.0
    }
}

/// Contribution of the booked jockey, zero without one.
#[must_use]
pub fn jockey_bonus(jockey: Option<&Player>) -> f64 {
    jockey.map_or(0.0, |j| {
        JOCKEY_LEVEL_WEIGHT * f64::from(j.level) + JOCKEY_REPUTATION_WEIGHT * f64::from(j.reputation)
    })
}

/// Every term of one entrant's final score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Weighted stats.
    pub base: f64,
    /// Surface match.
    pub surface: f64,
    /// Distance match.
    pub distance: f64,
    /// Jockey contribution.
    pub jockey: f64,
    /// Racing luck.
    pub luck: f64,
}

impl ScoreBreakdown {
    /// Scores one entrant with an already-drawn luck value.
    #[must_use]
    pub fn compute(horse: &Horse, track: &Track, jockey: Option<&Player>, luck: f64) -> Self {
        Self {
            base: base_score(&horse.stats),
            surface: surface_bonus(horse, track),
            distance: distance_bonus(horse, track),
            jockey: jockey_bonus(jockey),
            luck,
        }
    }

    /// Final score.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base + self.surface + self.distance + self.jockey + self.luck
    }
}
