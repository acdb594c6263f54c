//! # Horses

use paddock_shared::constants::{
    MAX_ATTRIBUTE, MAX_FORM, MAX_HORSE_NAME_BYTES, MIN_ATTRIBUTE, MIN_FORM,
};
use paddock_shared::{DistanceBand, Surface, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Racing ability of a horse.
///
/// Speed, stamina and acceleration are rated 1-100, form 1-10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Top speed.
    pub speed: u8,
    /// Ability to hold pace over distance.
    pub stamina: u8,
    /// Ability to reach top speed.
    pub acceleration: u8,
    /// Current condition.
    pub form: u8,
}

impl Stats {
    /// Creates a stat line. Bounds are checked when it is attached to a horse.
    #[must_use]
    pub const fn new(speed: u8, stamina: u8, acceleration: u8, form: u8) -> Self {
        Self {
            speed,
            stamina,
            acceleration,
            form,
        }
    }

    fn validate(&self, subject: &str) -> CoreResult<()> {
        let checks = [
            ("speed", self.speed, MIN_ATTRIBUTE, MAX_ATTRIBUTE),
            ("stamina", self.stamina, MIN_ATTRIBUTE, MAX_ATTRIBUTE),
            ("acceleration", self.acceleration, MIN_ATTRIBUTE, MAX_ATTRIBUTE),
            ("form", self.form, MIN_FORM, MAX_FORM),
        ];
        for (field, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(CoreError::StatOutOfRange {
                    subject: subject.to_owned(),
                    field,
                    value: u32::from(value),
                    min: u32::from(min),
                    max: u32::from(max),
                });
            }
        }
        Ok(())
    }
}

fn default_age() -> u8 {
    4
}

/// A horse in the game. The name is its unique key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    /// Unique name.
    pub name: String,
    /// Racing ability.
    #[serde(flatten)]
    pub stats: Stats,
    /// Preferred racing surface.
    pub surface_preference: Surface,
    /// Preferred race length.
    pub distance_preference: DistanceBand,
    /// Age in years.
    #[serde(default = "default_age")]
    pub age: u8,
    /// Market value.
    #[serde(default)]
    pub value: u64,
    /// Owning player, if any.
    #[serde(default)]
    pub owner: Option<UserId>,
    /// Training player, if any.
    #[serde(default)]
    pub trainer: Option<UserId>,
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    races: u32,
}

impl Horse {
    /// Creates an unowned, unraced horse.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NameTooLong`] or [`CoreError::StatOutOfRange`] on invalid input.
    pub fn new(
        name: impl Into<String>,
        stats: Stats,
        surface_preference: Surface,
        distance_preference: DistanceBand,
    ) -> CoreResult<Self> {
        let horse = Self {
            name: name.into(),
            stats,
            surface_preference,
            distance_preference,
            age: default_age(),
            value: 0,
            owner: None,
            trainer: None,
            wins: 0,
            races: 0,
        };
        horse.validate()?;
        Ok(horse)
    }

    /// Sets the age.
    #[must_use]
    pub fn with_age(mut self, age: u8) -> Self {
        self.age = age;
        self
    }

    /// Sets the market value.
    #[must_use]
    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    /// Checks the name length, stat bounds and the race record.
    ///
    /// Records loaded from roster files go through this before entering the store.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.len() > MAX_HORSE_NAME_BYTES {
            return Err(CoreError::NameTooLong {
                name: self.name.clone(),
                len: self.name.len(),
                max: MAX_HORSE_NAME_BYTES,
            });
        }
        self.stats.validate(&self.name)?;
        if self.wins > self.races {
            return Err(CoreError::ImpossibleRecord {
                horse: self.name.clone(),
                wins: self.wins,
                races: self.races,
            });
        }
        Ok(())
    }

    /// Races won.
    #[must_use]
    pub const fn wins(&self) -> u32 {
        self.wins
    }

    /// Races started.
    #[must_use]
    pub const fn races(&self) -> u32 {
        self.races
    }

    /// Records one start. Wins never exceed races.
    pub fn record_start(&mut self, won: bool) {
        self.races = self.races.saturating_add(1);
        if won {
            self.wins = self.wins.saturating_add(1);
        }
    }

    /// Returns true if the horse has no owner.
    #[must_use]
    pub const fn is_unowned(&self) -> bool {
        self.owner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> Stats {
        Stats::new(80, 70, 60, 8)
    }

    #[test]
    fn test_new_horse_is_unowned_and_unraced() {
        let horse = Horse::new("Thunder", stats(), Surface::Dirt, DistanceBand::Mile).unwrap();
        assert!(horse.is_unowned());
        assert_eq!((horse.wins(), horse.races()), (0, 0));
        assert_eq!(horse.age, 4);
    }

    #[test]
    fn test_out_of_range_stats_are_rejected() {
        let bad = [
            Stats::new(0, 70, 60, 8),
            Stats::new(80, 101, 60, 8),
            Stats::new(80, 70, 0, 8),
            Stats::new(80, 70, 60, 11),
            Stats::new(80, 70, 60, 0),
        ];
        for stats in bad {
            let err = Horse::new("Bad", stats, Surface::Turf, DistanceBand::Sprint).unwrap_err();
            assert!(matches!(err, CoreError::StatOutOfRange { .. }), "{err}");
        }
    }

    #[test]
    fn test_form_error_names_field_and_bounds() {
        let err = Horse::new("Lazy", Stats::new(50, 50, 50, 12), Surface::Dirt, DistanceBand::Mile)
            .unwrap_err();
        assert_eq!(err.to_string(), "form of Lazy must be within 1..=10, got 12");
    }

    #[test]
    fn test_name_must_fit_a_buy_button() {
        let longest = "x".repeat(MAX_HORSE_NAME_BYTES);
        assert!(Horse::new(longest.as_str(), stats(), Surface::Turf, DistanceBand::Mile).is_ok());

        let err = Horse::new(
            "Sir Reginald Featherstonehaugh of the Upper Windermere Downs and Far Fells",
            stats(),
            Surface::Turf,
            DistanceBand::Mile,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::NameTooLong { len: 74, max: 60, .. }), "{err}");
    }

    #[test]
    fn test_record_start_keeps_wins_within_races() {
        let mut horse = Horse::new("Runner", stats(), Surface::Dirt, DistanceBand::Mile).unwrap();
        horse.record_start(true);
        horse.record_start(false);
        horse.record_start(true);
        assert_eq!(horse.races(), 3);
        assert_eq!(horse.wins(), 2);
        assert!(horse.validate().is_ok());
    }
}
