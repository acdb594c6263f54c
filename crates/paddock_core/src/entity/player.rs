//! # Players

use std::collections::BTreeSet;

use paddock_shared::constants::{DEFAULT_STARTING_MONEY, STARTING_LEVEL};
use paddock_shared::{Role, UserId};

/// A registered player. The user id is its unique key.
///
/// The role is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Chat platform user id.
    pub user_id: UserId,
    /// Name used in replies.
    pub display_name: String,
    /// Career level.
    pub level: u32,
    /// Accumulated experience.
    pub experience: u64,
    /// Cash balance.
    pub money: u64,
    /// Standing with the racing public.
    pub reputation: u32,
    role: Role,
    horses: BTreeSet<String>,
    contracts: BTreeSet<String>,
}

impl Player {
    /// Creates a level-1 player with the default balance and empty collections.
    #[must_use]
    pub fn new(user_id: UserId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            level: STARTING_LEVEL,
            experience: 0,
            money: DEFAULT_STARTING_MONEY,
            reputation: 0,
            role,
            horses: BTreeSet::new(),
            contracts: BTreeSet::new(),
        }
    }

    /// The role chosen when joining.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Names of owned horses, alphabetical.
    pub fn horses(&self) -> impl Iterator<Item = &str> {
        self.horses.iter().map(String::as_str)
    }

    /// Number of owned horses.
    #[must_use]
    pub fn horse_count(&self) -> usize {
        self.horses.len()
    }

    /// Returns true if the player owns the named horse.
    #[must_use]
    pub fn owns(&self, horse: &str) -> bool {
        self.horses.contains(horse)
    }

    /// Horses this player is booked to ride, alphabetical.
    pub fn contracts(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(String::as_str)
    }

    /// Adds money to the balance.
    pub fn credit(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Adds experience.
    pub fn gain_experience(&mut self, amount: u64) {
        self.experience = self.experience.saturating_add(amount);
    }

    pub(crate) fn add_horse(&mut self, horse: &str) {
        self.horses.insert(horse.to_owned());
    }

    pub(crate) fn add_contract(&mut self, horse: &str) {
        self.contracts.insert(horse.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new(7, "Ada", Role::Trainer);
        assert_eq!(player.role(), Role::Trainer);
        assert_eq!(player.level, 1);
        assert_eq!(player.experience, 0);
        assert_eq!(player.money, 10_000);
        assert_eq!(player.horse_count(), 0);
        assert_eq!(player.contracts().count(), 0);
    }

    #[test]
    fn test_collections_are_per_player() {
        let mut a = Player::new(1, "A", Role::Owner);
        let b = Player::new(2, "B", Role::Owner);
        a.add_horse("Comet");
        assert!(a.owns("Comet"));
        assert!(!b.owns("Comet"));
    }

    #[test]
    fn test_credit_saturates() {
        let mut player = Player::new(1, "Rich", Role::Owner);
        player.money = u64::MAX - 1;
        player.credit(10);
        assert_eq!(player.money, u64::MAX);
    }
}
