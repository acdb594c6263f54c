//! # Tracks

use paddock_shared::{DistanceBand, Surface, TrackCondition, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

fn default_level() -> u32 {
    1
}

/// A racecourse. The name is its unique key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique name.
    pub name: String,
    /// Racing surface.
    pub surface: Surface,
    /// Race length in furlongs.
    pub distance_furlongs: u16,
    /// Current going.
    #[serde(default)]
    pub condition: TrackCondition,
    /// Owning player, if any.
    #[serde(default)]
    pub owner: Option<UserId>,
    /// Facility level.
    #[serde(default = "default_level")]
    pub level: u32,
    /// Standing with the racing public.
    #[serde(default)]
    pub reputation: u32,
}

impl Track {
    /// Creates an unowned level-1 track.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatOutOfRange`] for a zero-length track.
    pub fn new(
        name: impl Into<String>,
        surface: Surface,
        distance_furlongs: u16,
        condition: TrackCondition,
    ) -> CoreResult<Self> {
        let track = Self {
            name: name.into(),
            surface,
            distance_furlongs,
            condition,
            owner: None,
            level: default_level(),
            reputation: 0,
        };
        track.validate()?;
        Ok(track)
    }

    /// Checks the track length.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatOutOfRange`] for a zero-length track.
    pub fn validate(&self) -> CoreResult<()> {
        if self.distance_furlongs == 0 {
            return Err(CoreError::StatOutOfRange {
                subject: self.name.clone(),
                field: "distance_furlongs",
                value: 0,
                min: 1,
                max: u32::from(u16::MAX),
            });
        }
        Ok(())
    }

    /// Distance band of races run here.
    #[must_use]
    pub const fn band(&self) -> DistanceBand {
        DistanceBand::for_furlongs(self.distance_furlongs)
    }

    /// Returns true if the track has no owner.
    #[must_use]
    pub const fn is_unowned(&self) -> bool {
        self.owner.is_none()
    }
}
