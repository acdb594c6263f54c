//! # Roster Seeding
//!
//! Horses and tracks that exist from the moment the bot starts.
//!
//! A roster comes either from the built-in stable or from a TOML file:
//!
//! ```toml
//! [[horses]]
//! name = "Thunder Road"
//! speed = 85
//! stamina = 78
//! acceleration = 80
//! form = 8
//! surface_preference = "dirt"
//! distance_preference = "mile"
//! value = 15000
//!
//! [[tracks]]
//! name = "Riverside Park"
//! surface = "dirt"
//! distance_furlongs = 8
//! condition = "good"
//! ```

use std::path::Path;

use paddock_shared::{DistanceBand, Surface, TrackCondition};
use serde::Deserialize;

use crate::entity::{Horse, Stats, Track};
use crate::error::{CoreError, CoreResult};
use crate::state::GameState;

/// Seed data for a fresh game.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Roster {
    /// Starting horses.
    #[serde(default)]
    pub horses: Vec<Horse>,
    /// Starting tracks.
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Roster {
    /// Parses a TOML roster.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRoster`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        toml::from_str(text).map_err(|e| CoreError::InvalidRoster(e.to_string()))
    }

    /// Reads a TOML roster file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRoster`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::InvalidRoster(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Builds a game state, validating every record.
    ///
    /// Seeded horses and tracks start unowned regardless of the file.
    ///
    /// # Errors
    ///
    /// Returns the first invalid or duplicate record.
    pub fn into_state(self) -> CoreResult<GameState> {
        let mut state = GameState::new();
        for mut horse in self.horses {
            horse.owner = None;
            horse.trainer = None;
            state.insert_horse(horse)?;
        }
        for mut track in self.tracks {
            track.owner = None;
            state.insert_track(track)?;
        }
        tracing::debug!(
            horses = state.horses().count(),
            tracks = state.list_tracks().len(),
            "roster seeded"
        );
        Ok(state)
    }

    /// The stable every new game starts with.
    ///
    /// # Errors
    ///
    /// Never fails for the shipped data; the `Result` covers validation.
    pub fn builtin() -> CoreResult<Self> {
        use DistanceBand::{Distance, Mile, Sprint};
        use Surface::{Dirt, Synthetic, Turf};

        let horses = [
            ("Thunder Road", Stats::new(85, 78, 80, 8), Dirt, Mile, 4, 15_000),
            ("Silver Arrow", Stats::new(80, 72, 88, 7), Turf, Sprint, 3, 14_000),
            ("Midnight Express", Stats::new(76, 90, 70, 9), Dirt, Distance, 5, 16_000),
            ("Golden Gale", Stats::new(82, 75, 79, 6), Synthetic, Mile, 4, 12_500),
            ("Desert Storm", Stats::new(88, 68, 84, 7), Dirt, Sprint, 3, 17_500),
            ("Emerald Isle", Stats::new(74, 86, 72, 8), Turf, Distance, 6, 11_000),
            ("Copper Comet", Stats::new(70, 70, 75, 5), Synthetic, Sprint, 4, 8_000),
            ("Blue Horizon", Stats::new(78, 80, 74, 4), Turf, Mile, 7, 7_000),
        ]
        .into_iter()
        .map(|(name, stats, surface, band, age, value)| {
            Horse::new(name, stats, surface, band).map(|h| h.with_age(age).with_value(value))
        })
        .collect::<CoreResult<Vec<_>>>()?;

        let tracks = [
            ("Riverside Park", Dirt, 8, TrackCondition::Good),
            ("Greenfield Downs", Turf, 12, TrackCondition::Fast),
            ("Sunset Sprintway", Synthetic, 6, TrackCondition::Good),
            ("Highland Oval", Dirt, 10, TrackCondition::Soft),
        ]
        .into_iter()
        .map(|(name, surface, furlongs, condition)| Track::new(name, surface, furlongs, condition))
        .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self { horses, tracks })
    }
}
