//! User actions on the table.
//!
//! Every discrete thing a player can do at the table is one `TableAction`.
//! The session applies an action synchronously and then persists only the
//! storage keys that action touched (see `TableAction::touched_keys`).

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::player::PlayerId;
use super::slot::CardPos;
use crate::cards::{Card, CardStats};

/// One independently persisted piece of table state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKey {
    Zones,
    Health,
    Tapped,
    Attacking,
    Blocking,
    CardStats,
    SavedTables,
}

impl StorageKey {
    /// The five keys that together make up the live table document.
    pub const TABLE: [StorageKey; 5] = [
        StorageKey::Zones,
        StorageKey::Health,
        StorageKey::Tapped,
        StorageKey::Attacking,
        StorageKey::Blocking,
    ];
}

/// A user action on the table.
///
/// ## Example
///
/// ```
/// use ccg_tabletop::core::{CardPos, PlayerId, StorageKey, TableAction};
///
/// let untap = TableAction::Untap { pos: CardPos::new(PlayerId::FIRST, 0) };
/// assert!(untap.touched_keys().contains(&StorageKey::Blocking));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableAction {
    /// Put a card from the registry into a zone.
    AddCard { card: Card, zone: PlayerId },
    /// Remove the card at a position.
    RemoveCard { pos: CardPos },
    /// Move the first copy of `card` found in `from` to `to`.
    MoveCard { card: Card, from: PlayerId, to: PlayerId },
    /// Move the card at an explicit position to `to`.
    MoveCardAt { pos: CardPos, to: PlayerId },
    /// Declare an attack.
    Attack { pos: CardPos },
    /// Tap to activate an ability.
    ActivateAbility { pos: CardPos },
    /// Block the opponent's attacker at `target_index`.
    Block { blocker: CardPos, target_index: usize },
    /// Untap, clearing attack and block state.
    Untap { pos: CardPos },
    /// Replace a player's life total.
    SetHealth { player: PlayerId, value: i32 },
    /// Override power/toughness for every copy of a card.
    SetStats { card_id: String, stats: CardStats },
    /// Reset zones, flags and life totals.
    ClearTable,
}

impl TableAction {
    /// Storage keys whose persisted value may change when this action applies.
    #[must_use]
    pub fn touched_keys(&self) -> SmallVec<[StorageKey; 5]> {
        use StorageKey::*;

        match self {
            TableAction::AddCard { .. } => smallvec![Zones, Tapped, Attacking, CardStats],
            TableAction::RemoveCard { .. }
            | TableAction::MoveCard { .. }
            | TableAction::MoveCardAt { .. } => smallvec![Zones, Tapped, Attacking, Blocking],
            TableAction::Attack { .. } | TableAction::ActivateAbility { .. } => {
                smallvec![Tapped, Attacking]
            }
            TableAction::Block { .. } => smallvec![Blocking],
            TableAction::Untap { .. } => smallvec![Tapped, Attacking, Blocking],
            TableAction::SetHealth { .. } => smallvec![Health],
            TableAction::SetStats { .. } => smallvec![CardStats],
            TableAction::ClearTable => SmallVec::from_slice(&StorageKey::TABLE),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TableAction::AddCard { .. } => "add_card",
            TableAction::RemoveCard { .. } => "remove_card",
            TableAction::MoveCard { .. } => "move_card",
            TableAction::MoveCardAt { .. } => "move_card_at",
            TableAction::Attack { .. } => "attack",
            TableAction::ActivateAbility { .. } => "activate_ability",
            TableAction::Block { .. } => "block",
            TableAction::Untap { .. } => "untap",
            TableAction::SetHealth { .. } => "set_health",
            TableAction::SetStats { .. } => "set_stats",
            TableAction::ClearTable => "clear_table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_touches_only_health() {
        let action = TableAction::SetHealth { player: PlayerId::SECOND, value: 12 };
        assert_eq!(action.touched_keys().as_slice(), &[StorageKey::Health]);
    }

    #[test]
    fn test_removal_touches_blocking() {
        let action = TableAction::RemoveCard { pos: CardPos::new(PlayerId::FIRST, 0) };
        let keys = action.touched_keys();
        assert!(keys.contains(&StorageKey::Zones));
        assert!(keys.contains(&StorageKey::Blocking));
        assert!(!keys.contains(&StorageKey::Health));
    }

    #[test]
    fn test_clear_touches_whole_table() {
        assert_eq!(TableAction::ClearTable.touched_keys().len(), 5);
    }

    #[test]
    fn test_serialization() {
        let action = TableAction::Block {
            blocker: CardPos::new(PlayerId::SECOND, 1),
            target_index: 0,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains(r#""type":"block""#));

        let deserialized: TableAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
