//! # Domain Kinds
//!
//! Small closed vocabularies shared by the store, the simulator and the chat
//! protocol: surfaces, distance bands, track conditions and player roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MILE_MAX_FURLONGS, SPRINT_MAX_FURLONGS};

/// Racing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Dirt.
    Dirt,
    /// Grass.
    Turf,
    /// All-weather.
    Synthetic,
}

impl Surface {
    /// Lowercase label used in replies and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dirt => "dirt",
            Self::Turf => "turf",
            Self::Synthetic => "synthetic",
        }
    }
}

/// Distance classification of a race, also used as a horse's preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBand {
    /// Up to 7 furlongs.
    Sprint,
    /// Over 7 and up to 10 furlongs.
    Mile,
    /// Over 10 furlongs.
    Distance,
}

impl DistanceBand {
    /// Classifies a track length in furlongs.
    ///
    /// ```
    /// use paddock_shared::DistanceBand;
    ///
    /// assert_eq!(DistanceBand::for_furlongs(7), DistanceBand::Sprint);
    /// assert_eq!(DistanceBand::for_furlongs(8), DistanceBand::Mile);
    /// assert_eq!(DistanceBand::for_furlongs(11), DistanceBand::Distance);
    /// ```
    #[must_use]
    pub const fn for_furlongs(furlongs: u16) -> Self {
        if furlongs <= SPRINT_MAX_FURLONGS {
            Self::Sprint
        } else if furlongs <= MILE_MAX_FURLONGS {
            Self::Mile
        } else {
            Self::Distance
        }
    }

    /// Lowercase label used in replies and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sprint => "sprint",
            Self::Mile => "mile",
            Self::Distance => "distance",
        }
    }
}

/// Going on a track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCondition {
    /// Dry and firm.
    Fast,
    /// Normal going.
    #[default]
    Good,
    /// Rain-softened.
    Soft,
    /// Waterlogged.
    Heavy,
}

impl TrackCondition {
    /// Lowercase label used in replies and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Good => "good",
            Self::Soft => "soft",
            Self::Heavy => "heavy",
        }
    }
}

/// A player's role, chosen once when joining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owns and races horses.
    Owner,
    /// Rides other people's horses.
    Jockey,
    /// Trains horses.
    Trainer,
    /// Owns and runs a track.
    TrackOwner,
}

impl Role {
    /// Every role, in menu order.
    pub const ALL: [Self; 4] = [Self::Owner, Self::Jockey, Self::Trainer, Self::TrackOwner];

    /// Machine label, used in callback payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Jockey => "jockey",
            Self::Trainer => "trainer",
            Self::TrackOwner => "track_owner",
        }
    }

    /// Human label for menus and profiles.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Owner => "Horse Owner",
            Self::Jockey => "Jockey",
            Self::Trainer => "Trainer",
            Self::TrackOwner => "Track Owner",
        }
    }
}

macro_rules! label_impls {
    ($($ty:ident => [$($variant:ident),+]),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownKind;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $(
                        if s.eq_ignore_ascii_case(Self::$variant.as_str()) {
                            return Ok(Self::$variant);
                        }
                    )+
                    Err(UnknownKind {
                        kind: stringify!($ty),
                        value: s.to_owned(),
                    })
                }
            }
        )+
    };
}

label_impls! {
    Surface => [Dirt, Turf, Synthetic],
    DistanceBand => [Sprint, Mile, Distance],
    TrackCondition => [Fast, Good, Soft, Heavy],
    Role => [Owner, Jockey, Trainer, TrackOwner],
}

/// A label that does not name any variant of a kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKind {
    /// Which kind was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownKind {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        for furlongs in 0..=7 {
            assert_eq!(DistanceBand::for_furlongs(furlongs), DistanceBand::Sprint);
        }
        for furlongs in 8..=10 {
            assert_eq!(DistanceBand::for_furlongs(furlongs), DistanceBand::Mile);
        }
        for furlongs in [11, 12, 16, 24] {
            assert_eq!(DistanceBand::for_furlongs(furlongs), DistanceBand::Distance);
        }
    }

    #[test]
    fn test_role_labels_parse_back() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!("TRACK_OWNER".parse::<Role>(), Ok(Role::TrackOwner));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "mud".parse::<Surface>().unwrap_err();
        assert_eq!(err.kind, "Surface");
        assert_eq!(err.to_string(), "unknown Surface: \"mud\"");
    }
}
