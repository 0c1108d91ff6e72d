//! Named saved-game storage.
//!
//! A saved game is an opaque serializable record — the ordered round log
//! plus the pending half-move, from which everything else (including the
//! side to move) is derivable. The store keeps each saved game as a JSON
//! file in a directory and addresses it by name; it never interprets the
//! log itself.

mod store;

pub use store::{GameStore, SavedGame, SortOrder, StoreError};
