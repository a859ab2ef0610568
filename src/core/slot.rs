//! Slot identity and card positions.
//!
//! Two ways of naming a card on the table:
//!
//! - `CardPos`: zone + index. This is what the view layer and the persisted
//!   document speak. Indices shift when an earlier card is removed.
//! - `SlotId`: a store-allocated identity that never changes while the card
//!   stays in play and is never reused. Block targets point at a `SlotId`, so
//!   removing a card never has to re-key anything.
//!
//! ```
//! use ccg_tabletop::core::{CardPos, PlayerId};
//!
//! let pos = CardPos::from_raw(1, 2).unwrap();
//! assert_eq!(pos.zone, PlayerId::SECOND);
//! assert_eq!(pos.to_string(), "1:2");
//! assert!(CardPos::from_raw(2, 0).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::TableError;
use super::player::PlayerId;

/// Stable identity of a card slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl SlotId {
    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Positional reference to a card: which zone, which index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardPos {
    pub zone: PlayerId,
    pub index: usize,
}

impl CardPos {
    /// Create a position in a known zone.
    #[must_use]
    pub const fn new(zone: PlayerId, index: usize) -> Self {
        Self { zone, index }
    }

    /// Create a position from raw view-layer indices.
    pub fn from_raw(zone: usize, index: usize) -> Result<Self, TableError> {
        Ok(Self::new(PlayerId::try_from(zone)?, index))
    }

    /// Parse the `"zone:index"` key used by persisted blocking maps.
    ///
    /// Returns `None` for anything that is not two integers around a colon
    /// or whose zone is out of range.
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        let (zone, index) = key.split_once(':')?;
        let zone: usize = zone.trim().parse().ok()?;
        let index: usize = index.trim().parse().ok()?;
        Self::from_raw(zone, index).ok()
    }

    /// Render the `"zone:index"` key.
    #[must_use]
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for CardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.zone.index(), self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let pos = CardPos::new(PlayerId::FIRST, 12);
        assert_eq!(pos.key(), "0:12");
        assert_eq!(CardPos::parse_key(&pos.key()), Some(pos));
    }

    #[test]
    fn test_parse_key_rejects_garbage() {
        assert_eq!(CardPos::parse_key("2:0"), None);
        assert_eq!(CardPos::parse_key("0"), None);
        assert_eq!(CardPos::parse_key("a:b"), None);
        assert_eq!(CardPos::parse_key("0:-1"), None);
        assert_eq!(CardPos::parse_key(""), None);
    }

    #[test]
    fn test_from_raw_invalid_zone() {
        assert_eq!(CardPos::from_raw(5, 0), Err(TableError::InvalidZone(5)));
    }

    #[test]
    fn test_slot_ordering() {
        assert!(SlotId(1) < SlotId(2));
        assert_eq!(SlotId(7).raw(), 7);
    }
}
