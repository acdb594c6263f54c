//! # Store Contention Tests
//!
//! Many users joining at once must never be granted the same starter horse.
//!
//! Run with: cargo test -p paddock_core --test store_contention

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use paddock_core::{enroll, GameStore, Roster};
use paddock_shared::{ChatUser, Role};

#[test]
fn concurrent_owner_enrollment_never_double_grants() {
    let store = Arc::new(GameStore::new(Roster::builtin().unwrap().into_state().unwrap()));
    let horses_available = store.read().list_unowned_horses().len();
    let joiners = horses_available + 4;

    let handles: Vec<_> = (0..joiners)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let user = ChatUser {
                    id: i64::try_from(i).unwrap() + 1,
                    display_name: format!("owner{i}"),
                };
                store.transact(|state| enroll(state, &user, Role::Owner)).unwrap()
            })
        })
        .collect();

    let grants: Vec<String> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap().horse)
        .collect();

    let unique: HashSet<_> = grants.iter().collect();
    assert_eq!(grants.len(), horses_available, "every horse granted exactly once");
    assert_eq!(unique.len(), grants.len(), "no horse granted twice");

    let state = store.read();
    assert_eq!(state.player_count(), joiners);
    assert!(state.list_unowned_horses().is_empty());
    for name in &grants {
        let owner = state.get_horse(name).unwrap().owner.unwrap();
        assert!(state.get_player(owner).unwrap().owns(name));
    }
}

#[test]
fn concurrent_double_join_of_one_user_enrolls_once() {
    let store = Arc::new(GameStore::new(Roster::builtin().unwrap().into_state().unwrap()));
    let user = ChatUser {
        id: 77,
        display_name: "impatient".into(),
    };

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let user = user.clone();
            thread::spawn(move || store.transact(|state| enroll(state, &user, Role::Owner)).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(store.read().get_player(77).unwrap().horse_count(), 1);
}
