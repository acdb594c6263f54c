//! # Role Enrollment
//!
//! Joining the game: the only write-heavy path outside race day.
//!
//! | Role | Starting money | Starter grant |
//! |------|----------------|---------------|
//! | owner | 25 000 | first unowned horse, if any |
//! | track owner | 50 000 | first unowned track, if any |
//! | jockey / trainer | 10 000 | none |

use paddock_shared::constants::{
    DEFAULT_STARTING_MONEY, OWNER_STARTING_MONEY, TRACK_OWNER_STARTING_MONEY,
};
use paddock_shared::{ChatUser, Role};

use crate::entity::Player;
use crate::error::{CoreError, CoreResult};
use crate::state::GameState;

/// What a new player received on joining.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enrollment {
    /// Chosen role.
    pub role: Role,
    /// Opening balance.
    pub starting_money: u64,
    /// Starter horse, for owners.
    pub horse: Option<String>,
    /// Starter track, for track owners.
    pub track: Option<String>,
}

/// Opening balance for a role.
#[must_use]
pub const fn starting_money(role: Role) -> u64 {
    match role {
        Role::Owner => OWNER_STARTING_MONEY,
        Role::TrackOwner => TRACK_OWNER_STARTING_MONEY,
        Role::Jockey | Role::Trainer => DEFAULT_STARTING_MONEY,
    }
}

/// Creates the player record and hands out the role's starter grant.
///
/// Call with the store's write guard held for the whole call.
///
/// # Errors
///
/// Returns [`CoreError::AlreadyRegistered`] if the user already joined; in
/// that case nothing is granted.
pub fn enroll(state: &mut GameState, user: &ChatUser, role: Role) -> CoreResult<Enrollment> {
    if let Some(existing) = state.get_player(user.id) {
        return Err(CoreError::AlreadyRegistered {
            user_id: user.id,
            role: existing.role(),
        });
    }

    let mut player = Player::new(user.id, user.display_name.clone(), role);
    player.money = starting_money(role);
    state.upsert_player(player);

    let horse = match role {
        Role::Owner => first_unowned_horse(state),
        _ => None,
    };
    if let Some(name) = &horse {
        state.assign_horse_owner(name, user.id)?;
    }

    let track = match role {
        Role::TrackOwner => first_unowned_track(state),
        _ => None,
    };
    if let Some(name) = &track {
        state.assign_track_owner(name, user.id)?;
    }

    tracing::debug!(user_id = user.id, %role, ?horse, ?track, "player enrolled");

    Ok(Enrollment {
        role,
        starting_money: starting_money(role),
        horse,
        track,
    })
}

fn first_unowned_horse(state: &GameState) -> Option<String> {
    state
        .list_unowned_horses()
        .first()
        .map(|h| h.name.clone())
}

fn first_unowned_track(state: &GameState) -> Option<String> {
    state
        .list_tracks()
        .into_iter()
        .find(|t| t.is_unowned())
        .map(|t| t.name.clone())
}
