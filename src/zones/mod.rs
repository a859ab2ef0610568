//! Zone system for cards on the table.
//!
//! Each player has exactly one zone: an ordered row of cards. Cards are
//! appended on entry and removed by position.
//!
//! ## Key Types
//!
//! - `ZoneStore`: Both zones, positional mutation, lookups
//! - `CardSlot`: One card plus its tapped/attacking/blocking state

pub mod slot;
pub mod store;

pub use slot::CardSlot;
pub use store::ZoneStore;
