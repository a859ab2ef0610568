//! Core table types: players, positions, actions, errors, RNG, configuration.
//!
//! Everything here is shared by the zone store, the combat rules and the
//! snapshot codec. Nothing in this module mutates table state on its own.

pub mod player;
pub mod slot;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use slot::{CardPos, SlotId};
pub use rng::TableRng;
pub use config::{StorageKeys, TableConfig};
pub use action::{StorageKey, TableAction};
pub use error::TableError;
