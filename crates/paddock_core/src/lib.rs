//! # PADDOCK Core
//!
//! The stable book: every horse, track and player, and the rules for
//! changing them.
//!
//! ## Design Principles
//!
//! 1. **One store, one lock** - `GameStore` wraps the whole `GameState`
//! 2. **Explicit constructors** - entities validate their stats on creation
//! 3. **No persistence** - the state lives exactly as long as the process
//!
//! ## Example
//!
//! ```rust
//! use paddock_core::{enroll, GameStore, Roster};
//! use paddock_shared::{ChatUser, Role};
//!
//! let store = GameStore::new(Roster::builtin()?.into_state()?);
//! let user = ChatUser { id: 1, display_name: "Ada".into() };
//!
//! let joined = store.transact(|state| enroll(state, &user, Role::Owner))?;
//! assert_eq!(joined.starting_money, 25_000);
//! # Ok::<(), paddock_core::CoreError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod enrollment;
pub mod entity;
pub mod error;
pub mod roster;
pub mod state;

pub use enrollment::{enroll, starting_money, Enrollment};
pub use entity::{Horse, Player, Stats, Track};
pub use error::{CoreError, CoreResult};
pub use roster::Roster;
pub use state::{GameState, GameStore};
