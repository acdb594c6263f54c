//! Entity records: plain data with explicit constructors.

mod horse;
mod player;
mod track;

pub use horse::{Horse, Stats};
pub use player::Player;
pub use track::Track;
