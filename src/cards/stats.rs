//! Power/toughness overrides.
//!
//! Players edit power and toughness in place without touching the immutable
//! `Card`. Overrides are keyed by card id, so every copy of a card shares one
//! value, and they outlive the card's stay on the table: a token that leaves
//! and comes back keeps its edited stats. Nothing here ever deletes an entry.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// A power/toughness pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardStats {
    pub power: i32,
    pub toughness: i32,
}

impl CardStats {
    #[must_use]
    pub const fn new(power: i32, toughness: i32) -> Self {
        Self { power, toughness }
    }
}

impl std::fmt::Display for CardStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.power, self.toughness)
    }
}

/// Overrides by card id.
///
/// ```
/// use ccg_tabletop::cards::{Card, CardStats, CardStatsTable};
///
/// let bear = Card::new("bear", "Grizzly Bears").with_power_toughness("2", "2");
/// let mut stats = CardStatsTable::new();
///
/// stats.seed_from(&bear);
/// assert_eq!(stats.effective(&bear), Some(CardStats::new(2, 2)));
///
/// stats.set("bear", CardStats::new(4, 4));
/// assert_eq!(stats.effective(&bear), Some(CardStats::new(4, 4)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardStatsTable {
    entries: FxHashMap<String, CardStats>,
}

impl CardStatsTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the override for a card id.
    #[must_use]
    pub fn get(&self, card_id: &str) -> Option<CardStats> {
        self.entries.get(card_id).copied()
    }

    /// Set the override for a card id.
    pub fn set(&mut self, card_id: impl Into<String>, stats: CardStats) {
        self.entries.insert(card_id.into(), stats);
    }

    /// Record a card's printed stats as it enters play.
    ///
    /// Only numeric stats are recorded. The last numeric write wins, so a
    /// fresh copy entering play resets an earlier edit for that id.
    /// Returns whether anything was written.
    pub fn seed_from(&mut self, card: &Card) -> bool {
        match card.numeric_stats() {
            Some(stats) => {
                self.set(card.id.clone(), stats);
                true
            }
            None => false,
        }
    }

    /// Power/toughness to show for a card: override first, then printed stats.
    #[must_use]
    pub fn effective(&self, card: &Card) -> Option<CardStats> {
        self.get(&card.id).or_else(|| card.numeric_stats())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (card id, stats) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, CardStats)> {
        self.entries.iter().map(|(id, stats)| (id.as_str(), *stats))
    }
}
