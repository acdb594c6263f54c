//! # Game Constants
//!
//! Balance values for PADDOCK.
//!
//! **NOTE:** Race weights are part of the game's contract with players.
//! Changing them changes every historical comparison.

// =============================================================================
// RACE SCORING
// =============================================================================

/// Weight of a horse's speed in the base performance score.
pub const SPEED_WEIGHT: f64 = 0.4;

/// Weight of a horse's stamina in the base performance score.
pub const STAMINA_WEIGHT: f64 = 0.3;

/// Weight of a horse's acceleration in the base performance score.
pub const ACCELERATION_WEIGHT: f64 = 0.2;

/// Weight of a horse's form in the base performance score.
pub const FORM_WEIGHT: f64 = 0.1;

/// Bonus when the horse's preferred surface matches the track surface.
pub const SURFACE_MATCH_BONUS: f64 = 5.0;

/// Bonus when the horse's preferred distance matches the track's band.
pub const DISTANCE_MATCH_BONUS: f64 = 3.0;

/// Points per jockey level.
pub const JOCKEY_LEVEL_WEIGHT: f64 = 2.0;

/// Points per jockey reputation point.
pub const JOCKEY_REPUTATION_WEIGHT: f64 = 0.1;

/// Racing luck is drawn uniformly from `[-LUCK_SPREAD, LUCK_SPREAD]`.
pub const LUCK_SPREAD: f64 = 10.0;

/// Longest track (in furlongs) that still counts as a sprint.
pub const SPRINT_MAX_FURLONGS: u16 = 7;

/// Longest track (in furlongs) that still counts as a mile.
pub const MILE_MAX_FURLONGS: u16 = 10;

// =============================================================================
// RACE DAY
// =============================================================================

/// Minimum number of eligible horses before a race can start.
pub const MIN_FIELD_SIZE: usize = 4;

/// Default maximum number of horses in a single race.
pub const DEFAULT_MAX_FIELD: usize = 8;

/// A horse must have form strictly above this value to be entered.
pub const ELIGIBLE_FORM_THRESHOLD: u8 = 5;

/// Default purse paid to the owners of 1st, 2nd and 3rd.
pub const DEFAULT_PURSE: [u64; 3] = [5_000, 2_500, 1_000];

/// Experience credited to a booked jockey for each placing.
pub const EXPERIENCE_PER_PLACING: u64 = 10;

// =============================================================================
// PLAYERS & MARKET
// =============================================================================

/// Starting balance for players without a role-specific grant.
pub const DEFAULT_STARTING_MONEY: u64 = 10_000;

/// Starting balance for horse owners.
pub const OWNER_STARTING_MONEY: u64 = 25_000;

/// Starting balance for track owners.
pub const TRACK_OWNER_STARTING_MONEY: u64 = 50_000;

/// Starting level for every new player.
pub const STARTING_LEVEL: u32 = 1;

/// Maximum number of horses listed by the market.
pub const MARKET_PAGE_SIZE: usize = 5;

/// Largest button payload the chat platform accepts, in bytes.
pub const MAX_CALLBACK_BYTES: usize = 64;

/// Longest horse name, in bytes, that still fits a `buy:` button payload.
pub const MAX_HORSE_NAME_BYTES: usize = MAX_CALLBACK_BYTES - "buy:".len();

// =============================================================================
// STAT BOUNDS
// =============================================================================

/// Inclusive lower bound for speed, stamina and acceleration.
pub const MIN_ATTRIBUTE: u8 = 1;

/// Inclusive upper bound for speed, stamina and acceleration.
pub const MAX_ATTRIBUTE: u8 = 100;

/// Inclusive lower bound for form.
pub const MIN_FORM: u8 = 1;

/// Inclusive upper bound for form.
pub const MAX_FORM: u8 = 10;
