//! # ccg-tabletop
//!
//! A two-player tabletop for trading card games. Players put cards from a
//! card database onto the table, tap them, attack, block and track life.
//! The engine enforces combat bookkeeping only; it does not play the game.
//!
//! ## Design Principles
//!
//! 1. **Two Players, Two Zones**: `PlayerId` can only be 0 or 1, and every
//!    per-player container is a fixed-size `PlayerMap`.
//!
//! 2. **Stable Slot Identity**: A block refers to its attacker's `SlotId`,
//!    not its position, so removing cards never corrupts blocks.
//!
//! 3. **Illegal Input Is an Error**: Combat transitions check their
//!    preconditions and return `TableError` instead of silently doing nothing.
//!
//! 4. **Storage Never Blocks Play**: Malformed stored data falls back to
//!    defaults; failed writes are logged and skipped.
//!
//! ## Modules
//!
//! - `core`: Players, positions, actions, errors, RNG, configuration
//! - `cards`: Card records, stat overrides, the card registry seam
//! - `zones`: The two zones and their slots
//! - `combat`: Attack, block, ability and untap transitions
//! - `snapshot`: Document format, codec, key-value storage, saved tables
//! - `summary`: Match summary and card-state panel text
//! - `table`: `Table` and its persisted `TableSession`

pub mod core;
pub mod cards;
pub mod zones;
pub mod combat;
pub mod snapshot;
pub mod summary;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    CardPos, PlayerId, PlayerMap, SlotId,
    StorageKey, StorageKeys, TableAction, TableConfig, TableError, TableRng,
};

pub use crate::cards::{
    CachedRegistry, Card, CardRegistry, CardStats, CardStatsTable, RegistryError,
    SearchCoordinator, SearchToken,
};

pub use crate::zones::{CardSlot, ZoneStore};

pub use crate::combat::{CardRole, CombatAction, CombatError, TapStatus};

pub use crate::snapshot::{
    DirStore, KeyValueStore, MemoryStore, QuickSave, RestoreError, SavedTable, SavedTables,
    StorageError, TableDocument,
};

pub use crate::summary::{generate_summary, render_card_states};

pub use crate::table::{Table, TableSession};
