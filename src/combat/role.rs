//! Derived per-card combat role.
//!
//! No role is stored anywhere. It is read off a slot's flags each time, so
//! it can never disagree with them.

use crate::core::{CardPos, TableError};
use crate::zones::{CardSlot, ZoneStore};

/// What a card's tap flags say about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapStatus {
    Untapped,
    /// Tapped, not attacking, no ability text.
    Tapped,
    /// Tapped, not attacking, with ability text.
    ActivatedAbility,
    Attacking,
}

impl TapStatus {
    /// Read the status off a slot.
    #[must_use]
    pub fn of(slot: &CardSlot) -> Self {
        if slot.is_attacking() {
            TapStatus::Attacking
        } else if slot.is_tapped() && slot.card().has_ability() {
            TapStatus::ActivatedAbility
        } else if slot.is_tapped() {
            TapStatus::Tapped
        } else {
            TapStatus::Untapped
        }
    }

    /// Lower-case label used in match summaries.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            TapStatus::Untapped => None,
            TapStatus::Tapped => Some("tapped"),
            TapStatus::ActivatedAbility => Some("activated ability"),
            TapStatus::Attacking => Some("attacking"),
        }
    }
}

/// A card's full combat role: tap status plus the attacker it blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardRole {
    pub status: TapStatus,
    pub blocking: Option<CardPos>,
}

impl CardRole {
    /// Whether the card is doing nothing in combat.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == TapStatus::Untapped && self.blocking.is_none()
    }
}

/// The role of the card at `pos`.
pub fn role(store: &ZoneStore, pos: CardPos) -> Result<CardRole, TableError> {
    let slot = store.slot(pos)?;
    Ok(CardRole {
        status: TapStatus::of(slot),
        blocking: store.block_target_pos(pos),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::combat::rules::{activate_ability, declare_attack, declare_block};
    use crate::core::PlayerId;

    #[test]
    fn test_roles() {
        let mut store = ZoneStore::new();
        let bear = store.add_card(Card::new("bear", "Bear"), PlayerId::FIRST);
        let elf = store.add_card(
            Card::new("elf", "Elf").with_oracle_text("{T}: Add {G}."),
            PlayerId::FIRST,
        );
        let wall = store.add_card(Card::new("wall", "Wall"), PlayerId::SECOND);

        assert!(role(&store, bear).unwrap().is_idle());

        declare_attack(&mut store, bear).unwrap();
        activate_ability(&mut store, elf).unwrap();
        declare_block(&mut store, wall, bear).unwrap();

        assert_eq!(role(&store, bear).unwrap().status, TapStatus::Attacking);
        assert_eq!(role(&store, elf).unwrap().status, TapStatus::ActivatedAbility);

        let wall_role = role(&store, wall).unwrap();
        assert_eq!(wall_role.status, TapStatus::Untapped);
        assert_eq!(wall_role.blocking, Some(bear));
        assert!(!wall_role.is_idle());
    }

    #[test]
    fn test_plain_tap_label() {
        let mut store = ZoneStore::new();
        let pos = store.add_card(Card::new("land", "Forest"), PlayerId::FIRST);
        store.slot_mut(pos).unwrap().tapped = true;

        let status = role(&store, pos).unwrap().status;
        assert_eq!(status, TapStatus::Tapped);
        assert_eq!(status.label(), Some("tapped"));
        assert_eq!(TapStatus::Untapped.label(), None);
    }
}
