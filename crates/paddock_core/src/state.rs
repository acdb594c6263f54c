//! # Game State Store
//!
//! The single registry of players, horses and tracks, plus the daily race
//! gate and jockey bookings.
//!
//! ## Locking
//!
//! ```text
//! handler ──read()──>  GameStore  <──write()── enrollment / booking / race day
//!                         │
//!                 RwLock<GameState>
//! ```
//!
//! Queries take the read guard. Every read-modify-write sequence holds ONE
//! write guard from its first check to its last mutation, so two players can
//! never both receive the same starter horse and a day's race runs once.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use paddock_shared::{Role, UserId};

use crate::entity::{Horse, Player, Track};
use crate::error::{CoreError, CoreResult};

/// All mutable game data. Lost on restart.
#[derive(Debug, Default)]
pub struct GameState {
    players: HashMap<UserId, Player>,
    /// Keyed by name; `BTreeMap` keeps listings in a stable order.
    horses: BTreeMap<String, Horse>,
    tracks: BTreeMap<String, Track>,
    /// Horse name -> booked jockey.
    bookings: HashMap<String, UserId>,
    last_race_date: Option<NaiveDate>,
}

impl GameState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Players
    // ========================================================================

    /// Looks up a player.
    #[must_use]
    pub fn get_player(&self, user_id: UserId) -> Option<&Player> {
        self.players.get(&user_id)
    }

    /// Inserts or replaces a player record.
    pub fn upsert_player(&mut self, player: Player) {
        self.players.insert(player.user_id, player);
    }

    /// Number of registered players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Adds money to a player's balance.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownPlayer`] if the player does not exist.
    pub fn credit_player(&mut self, user_id: UserId, amount: u64) -> CoreResult<()> {
        self.player_mut(user_id)?.credit(amount);
        Ok(())
    }

    /// Adds experience to a player.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownPlayer`] if the player does not exist.
    pub fn award_experience(&mut self, user_id: UserId, amount: u64) -> CoreResult<()> {
        self.player_mut(user_id)?.gain_experience(amount);
        Ok(())
    }

    fn player_mut(&mut self, user_id: UserId) -> CoreResult<&mut Player> {
        self.players
            .get_mut(&user_id)
            .ok_or(CoreError::UnknownPlayer(user_id))
    }

    // ========================================================================
    // Horses
    // ========================================================================

    /// Looks up a horse by name.
    #[must_use]
    pub fn get_horse(&self, name: &str) -> Option<&Horse> {
        self.horses.get(name)
    }

    /// Adds a horse.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateName`] if the name is taken, or the
    /// horse's own validation error.
    pub fn insert_horse(&mut self, horse: Horse) -> CoreResult<()> {
        horse.validate()?;
        if self.horses.contains_key(&horse.name) {
            return Err(CoreError::DuplicateName(horse.name));
        }
        self.horses.insert(horse.name.clone(), horse);
        Ok(())
    }

    /// Every horse, by name.
    pub fn horses(&self) -> impl Iterator<Item = &Horse> {
        self.horses.values()
    }

    /// Horses without an owner, by name.
    #[must_use]
    pub fn list_unowned_horses(&self) -> Vec<&Horse> {
        self.horses.values().filter(|h| h.is_unowned()).collect()
    }

    /// Horses owned by a player, by name.
    #[must_use]
    pub fn horses_owned_by(&self, user_id: UserId) -> Vec<&Horse> {
        self.horses
            .values()
            .filter(|h| h.owner == Some(user_id))
            .collect()
    }

    /// Gives an unowned horse to an existing player.
    ///
    /// # Errors
    ///
    /// Fails if either side is unknown or the horse is already owned.
    pub fn assign_horse_owner(&mut self, name: &str, user_id: UserId) -> CoreResult<()> {
        if !self.players.contains_key(&user_id) {
            return Err(CoreError::UnknownPlayer(user_id));
        }
        let horse = self
            .horses
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownHorse(name.to_owned()))?;
        if !horse.is_unowned() {
            return Err(CoreError::AlreadyOwned(name.to_owned()));
        }
        horse.owner = Some(user_id);
        self.player_mut(user_id)?.add_horse(name);
        Ok(())
    }

    /// Records one start for a horse.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownHorse`] if the horse does not exist.
    pub fn record_start(&mut self, name: &str, won: bool) -> CoreResult<()> {
        self.horses
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownHorse(name.to_owned()))?
            .record_start(won);
        Ok(())
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Looks up a track by name.
    #[must_use]
    pub fn get_track(&self, name: &str) -> Option<&Track> {
        self.tracks.get(name)
    }

    /// Adds a track.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateName`] if the name is taken, or the
    /// track's own validation error.
    pub fn insert_track(&mut self, track: Track) -> CoreResult<()> {
        track.validate()?;
        if self.tracks.contains_key(&track.name) {
            return Err(CoreError::DuplicateName(track.name));
        }
        self.tracks.insert(track.name.clone(), track);
        Ok(())
    }

    /// Every track, by name.
    #[must_use]
    pub fn list_tracks(&self) -> Vec<&Track> {
        self.tracks.values().collect()
    }

    /// Gives an unowned track to an existing player.
    ///
    /// # Errors
    ///
    /// Fails if either side is unknown or the track is already owned.
    pub fn assign_track_owner(&mut self, name: &str, user_id: UserId) -> CoreResult<()> {
        if !self.players.contains_key(&user_id) {
            return Err(CoreError::UnknownPlayer(user_id));
        }
        let track = self
            .tracks
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownTrack(name.to_owned()))?;
        if !track.is_unowned() {
            return Err(CoreError::AlreadyOwned(name.to_owned()));
        }
        track.owner = Some(user_id);
        Ok(())
    }

    // ========================================================================
    // Jockey bookings
    // ========================================================================

    /// Books a jockey to ride a horse.
    ///
    /// Re-booking the same pair is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if the player or horse is unknown, the player is not a jockey,
    /// or another jockey already holds the ride.
    pub fn book_jockey(&mut self, horse: &str, jockey: UserId) -> CoreResult<()> {
        let player = self
            .players
            .get(&jockey)
            .ok_or(CoreError::UnknownPlayer(jockey))?;
        if player.role() != Role::Jockey {
            return Err(CoreError::NotAJockey {
                user_id: jockey,
                role: player.role(),
            });
        }
        if !self.horses.contains_key(horse) {
            return Err(CoreError::UnknownHorse(horse.to_owned()));
        }
        match self.bookings.get(horse) {
            Some(&holder) if holder != jockey => {
                return Err(CoreError::RideTaken {
                    horse: horse.to_owned(),
                    jockey: holder,
                });
            }
            Some(_) => return Ok(()),
            None => {}
        }
        self.bookings.insert(horse.to_owned(), jockey);
        self.player_mut(jockey)?.add_contract(horse);
        Ok(())
    }

    /// The jockey booked on a horse, if any.
    #[must_use]
    pub fn jockey_for(&self, horse: &str) -> Option<&Player> {
        self.bookings
            .get(horse)
            .and_then(|id| self.players.get(id))
    }

    // ========================================================================
    // Daily race gate
    // ========================================================================

    /// True unless a race has already been run on `today`.
    #[must_use]
    pub fn can_run_daily_race(&self, today: NaiveDate) -> bool {
        self.last_race_date != Some(today)
    }

    /// Closes the gate for `today`.
    pub fn mark_daily_race_run(&mut self, today: NaiveDate) {
        self.last_race_date = Some(today);
    }

    /// Date of the most recent race.
    #[must_use]
    pub const fn last_race_date(&self) -> Option<NaiveDate> {
        self.last_race_date
    }
}

/// Lock-guarded handle to the game state.
///
/// Owned by the runtime and shared by `Arc`.
#[derive(Debug, Default)]
pub struct GameStore {
    state: RwLock<GameState>,
}

impl GameStore {
    /// Wraps an initial state.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Shared access for queries.
    pub fn read(&self) -> RwLockReadGuard<'_, GameState> {
        self.state.read()
    }

    /// Exclusive access for read-modify-write sequences.
    pub fn write(&self) -> RwLockWriteGuard<'_, GameState> {
        self.state.write()
    }

    /// Runs `f` inside one write guard.
    pub fn transact<T>(&self, f: impl FnOnce(&mut GameState) -> T) -> T {
        let mut state = self.state.write();
        f(&mut state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Stats;
    use paddock_shared::{DistanceBand, Surface, TrackCondition};

    fn horse(name: &str) -> Horse {
        Horse::new(name, Stats::new(70, 70, 70, 7), Surface::Dirt, DistanceBand::Mile).unwrap()
    }

    fn state_with_horses(names: &[&str]) -> GameState {
        let mut state = GameState::new();
        for name in names {
            state.insert_horse(horse(name)).unwrap();
        }
        state
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_daily_gate() {
        let mut state = GameState::new();
        assert!(state.can_run_daily_race(date(1)));
        state.mark_daily_race_run(date(1));
        assert!(!state.can_run_daily_race(date(1)));
        assert!(state.can_run_daily_race(date(2)));
        assert_eq!(state.last_race_date(), Some(date(1)));
    }

    #[test]
    fn test_unowned_listing_is_sorted_and_excludes_owned() {
        let mut state = state_with_horses(&["Zephyr", "Apollo", "Maverick"]);
        state.upsert_player(Player::new(1, "Owner", Role::Owner));
        state.assign_horse_owner("Maverick", 1).unwrap();

        let names: Vec<_> = state.list_unowned_horses().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Apollo", "Zephyr"]);
        assert!(state.get_player(1).unwrap().owns("Maverick"));
        assert_eq!(state.horses_owned_by(1).len(), 1);
    }

    #[test]
    fn test_assign_owner_requires_existing_player() {
        let mut state = state_with_horses(&["Apollo"]);
        assert_eq!(
            state.assign_horse_owner("Apollo", 99),
            Err(CoreError::UnknownPlayer(99))
        );
        assert!(state.get_horse("Apollo").unwrap().is_unowned());
    }

    #[test]
    fn test_assign_owner_twice_fails() {
        let mut state = state_with_horses(&["Apollo"]);
        state.upsert_player(Player::new(1, "A", Role::Owner));
        state.upsert_player(Player::new(2, "B", Role::Owner));
        state.assign_horse_owner("Apollo", 1).unwrap();
        assert_eq!(
            state.assign_horse_owner("Apollo", 2),
            Err(CoreError::AlreadyOwned("Apollo".into()))
        );
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut state = state_with_horses(&["Apollo"]);
        assert_eq!(
            state.insert_horse(horse("Apollo")),
            Err(CoreError::DuplicateName("Apollo".into()))
        );
        let track = Track::new("Oval", Surface::Dirt, 8, TrackCondition::Good).unwrap();
        state.insert_track(track.clone()).unwrap();
        assert!(state.insert_track(track).is_err());
    }

    #[test]
    fn test_jockey_booking_rules() {
        let mut state = state_with_horses(&["Apollo"]);
        state.upsert_player(Player::new(1, "Jo", Role::Jockey));
        state.upsert_player(Player::new(2, "Kit", Role::Jockey));
        state.upsert_player(Player::new(3, "Tess", Role::Trainer));

        state.book_jockey("Apollo", 1).unwrap();
        state.book_jockey("Apollo", 1).unwrap();
        assert_eq!(state.jockey_for("Apollo").unwrap().user_id, 1);
        assert_eq!(state.get_player(1).unwrap().contracts().collect::<Vec<_>>(), ["Apollo"]);

        assert_eq!(
            state.book_jockey("Apollo", 2),
            Err(CoreError::RideTaken { horse: "Apollo".into(), jockey: 1 })
        );
        assert!(matches!(
            state.book_jockey("Apollo", 3),
            Err(CoreError::NotAJockey { role: Role::Trainer, .. })
        ));
        assert_eq!(
            state.book_jockey("Nobody", 1),
            Err(CoreError::UnknownHorse("Nobody".into()))
        );
    }

    #[test]
    fn test_store_transact_holds_one_guard() {
        let store = GameStore::new(state_with_horses(&["Apollo"]));
        let today = date(3);
        let first = store.transact(|s| {
            let open = s.can_run_daily_race(today);
            s.mark_daily_race_run(today);
            open
        });
        let second = store.transact(|s| s.can_run_daily_race(today));
        assert!(first);
        assert!(!second);
        assert_eq!(store.read().horses().count(), 1);
    }
}
