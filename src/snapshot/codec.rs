//! Conversion between live table state and `TableDocument`.
//!
//! Serializing is total. Stored data may come from older clients or be
//! hand-edited, so restoring repairs what it can and never panics.
//!
//! - Flag lists are truncated or padded with `false` to their zone's length.
//! - If both zones hold attackers, the zone with fewer attackers (the second
//!   player's on a tie) stops attacking. Its cards stay tapped.
//! - A blocking entry survives only if its key parses, the blocker exists,
//!   and the target is an attacking card in the other zone.
//!
//! Only a document that cannot be parsed at all is an error, and callers
//! answer that by falling back to an empty table.

use log::warn;
use serde_json::error::Category;

use super::document::{BlockTarget, TableDocument};
use crate::core::{CardPos, PlayerId, PlayerMap, SlotId};
use crate::zones::ZoneStore;

/// Why a stored document could not be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// Not valid JSON.
    Parse(String),
    /// Valid JSON of the wrong shape (wrong zone count, wrong field types).
    Shape(String),
}

impl std::fmt::Display for RestoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestoreError::Parse(reason) => write!(f, "Unparsable table document: {}", reason),
            RestoreError::Shape(reason) => write!(f, "Malformed table document: {}", reason),
        }
    }
}

impl std::error::Error for RestoreError {}

impl From<serde_json::Error> for RestoreError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => RestoreError::Shape(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => RestoreError::Parse(err.to_string()),
        }
    }
}

/// Live state rebuilt from a document.
#[derive(Clone, Debug)]
pub struct RestoredTable {
    pub zones: ZoneStore,
    pub health: PlayerMap<i32>,
    /// How many inconsistencies were repaired on the way in.
    pub repairs: usize,
}

/// Capture zones, flags, blocks and life totals as a document.
#[must_use]
pub fn serialize(zones: &ZoneStore, health: &PlayerMap<i32>) -> TableDocument {
    let player_areas = PlayerMap::new(|p| zones.zone(p).iter().map(|s| s.card().clone()).collect());
    let tapped = PlayerMap::new(|p| zones.zone(p).iter().map(|s| s.is_tapped()).collect());
    let attacking = PlayerMap::new(|p| zones.zone(p).iter().map(|s| s.is_attacking()).collect());

    let blocking = zones
        .iter()
        .filter_map(|(pos, _)| {
            let target = zones.block_target_pos(pos)?;
            Some((
                pos.key(),
                BlockTarget {
                    opponent_area: target.zone.index(),
                    opponent_idx: target.index,
                },
            ))
        })
        .collect();

    TableDocument {
        player_areas,
        player_health: health.clone(),
        tapped,
        attacking,
        blocking,
    }
}

/// Parse and restore a JSON document.
pub fn deserialize(json: &str) -> Result<RestoredTable, RestoreError> {
    let doc: TableDocument = serde_json::from_str(json)?;
    Ok(restore(&doc))
}

/// Render a document as JSON.
#[must_use]
pub fn to_json(doc: &TableDocument) -> String {
    // A TableDocument holds only strings, integers, bools and string-keyed
    // maps, none of which can fail to serialize.
    serde_json::to_string(doc).unwrap_or_default()
}

/// Rebuild live state from a document, repairing inconsistencies.
#[must_use]
pub fn restore(doc: &TableDocument) -> RestoredTable {
    let mut zones = ZoneStore::new();
    let mut repairs = 0;
    let mut ids: PlayerMap<Vec<SlotId>> = PlayerMap::default();

    let stand_down = conflicting_attack(doc);
    if let Some(player) = stand_down {
        warn!("snapshot: both sides attacking; {} stops attacking", player);
        repairs += 1;
    }

    for player in PlayerId::all() {
        let cards = &doc.player_areas[player];
        let tapped = &doc.tapped[player];
        let attacking = &doc.attacking[player];

        if tapped.len() != cards.len() || attacking.len() != cards.len() {
            warn!(
                "snapshot: {} has {} cards but {} tapped / {} attacking flags; resizing",
                player,
                cards.len(),
                tapped.len(),
                attacking.len()
            );
            repairs += 1;
        }

        for (index, card) in cards.iter().enumerate() {
            let is_tapped = tapped.get(index).copied().unwrap_or(false);
            let is_attacking = stand_down != Some(player) && attacking.get(index).copied().unwrap_or(false);
            let id = zones.push_restored(player, card.clone(), is_tapped, is_attacking);
            ids[player].push(id);
        }
    }

    for (key, target) in &doc.blocking {
        match resolve_block(&zones, &ids, key, target) {
            Some((blocker, target_id)) => {
                if let Ok(slot) = zones.slot_mut(blocker) {
                    slot.block_target = Some(target_id);
                }
            }
            None => {
                warn!("snapshot: dropping invalid blocking entry {:?} -> {:?}", key, target);
                repairs += 1;
            }
        }
    }

    RestoredTable {
        zones,
        health: doc.player_health.clone(),
        repairs,
    }
}

/// The zone that must stop attacking when both zones hold attackers.
fn conflicting_attack(doc: &TableDocument) -> Option<PlayerId> {
    let counts = PlayerMap::new(|p| {
        let cards = doc.player_areas[p].len();
        doc.attacking[p].iter().take(cards).filter(|&&a| a).count()
    });
    let (first, second) = (counts[PlayerId::FIRST], counts[PlayerId::SECOND]);
    if first == 0 || second == 0 {
        None
    } else if first < second {
        Some(PlayerId::FIRST)
    } else {
        Some(PlayerId::SECOND)
    }
}

fn resolve_block(
    zones: &ZoneStore,
    ids: &PlayerMap<Vec<SlotId>>,
    key: &str,
    target: &BlockTarget,
) -> Option<(CardPos, SlotId)> {
    let blocker = CardPos::parse_key(key)?;
    zones.get(blocker)?;

    let target_zone = PlayerId::try_from(target.opponent_area).ok()?;
    if target_zone != blocker.zone.opponent() {
        return None;
    }
    let target_pos = CardPos::new(target_zone, target.opponent_idx);
    if !zones.get(target_pos)?.is_attacking() {
        return None;
    }
    let target_id = *ids[target_zone].get(target.opponent_idx)?;
    Some((blocker, target_id))
}

/// Whether two documents describe the same table.
#[must_use]
pub fn same_state(a: &TableDocument, b: &TableDocument) -> bool {
    a == b
}
