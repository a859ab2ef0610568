//! The persisted table document.
//!
//! This is the shape stored under each saved table's `data` field and, split
//! field by field, under the live-table storage keys. Field names follow the
//! JSON the web client has always written (`playerAreas`, `opponentIdx`, ...)
//! so existing saves keep loading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerMap;

/// Where a blocker's attacker sits, by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTarget {
    pub opponent_area: usize,
    pub opponent_idx: usize,
}

/// Full table state as plain data.
///
/// Contains nothing derived. `blocking` is keyed by `"zone:index"` of the
/// blocker and is a `BTreeMap`, so two documents compare equal regardless of
/// the order entries were inserted in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    pub player_areas: PlayerMap<Vec<Card>>,
    pub player_health: PlayerMap<i32>,
    pub tapped: PlayerMap<Vec<bool>>,
    pub attacking: PlayerMap<Vec<bool>>,
    #[serde(default)]
    pub blocking: BTreeMap<String, BlockTarget>,
}

impl TableDocument {
    /// An empty table with both players at `starting_health`.
    #[must_use]
    pub fn empty(starting_health: i32) -> Self {
        Self {
            player_areas: PlayerMap::default(),
            player_health: PlayerMap::with_value(starting_health),
            tapped: PlayerMap::default(),
            attacking: PlayerMap::default(),
            blocking: BTreeMap::new(),
        }
    }

    /// Number of cards across both zones.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.player_areas.values().map(Vec::len).sum()
    }
}
