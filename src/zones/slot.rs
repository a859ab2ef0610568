//! Card slots - one card on the table plus its combat flags.
//!
//! A `CardSlot` is what sits at a zone position. Its flags travel with it,
//! so the number of flag sets always equals the number of cards in a zone,
//! and removing a slot removes its flags in the same step.

use crate::cards::Card;
use crate::core::SlotId;

/// A card on the table with its tap/attack/block state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSlot {
    pub(crate) id: SlotId,
    pub(crate) card: Card,
    pub(crate) tapped: bool,
    pub(crate) attacking: bool,
    /// The opposing attacker this card blocks.
    pub(crate) block_target: Option<SlotId>,
}

impl CardSlot {
    /// A freshly placed, untapped slot.
    pub(crate) fn new(id: SlotId, card: Card) -> Self {
        Self {
            id,
            card,
            tapped: false,
            attacking: false,
            block_target: None,
        }
    }

    /// Stable identity of this slot.
    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    #[must_use]
    pub fn is_tapped(&self) -> bool {
        self.tapped
    }

    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Whether this card is assigned to block an attacker.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.block_target.is_some()
    }

    /// The attacker this card blocks, by slot identity.
    ///
    /// Use `ZoneStore::block_target_pos` for the attacker's current position.
    #[must_use]
    pub fn block_target(&self) -> Option<SlotId> {
        self.block_target
    }

    /// Clear tap and attack state.
    pub(crate) fn untap(&mut self) {
        self.tapped = false;
        self.attacking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_idle() {
        let slot = CardSlot::new(SlotId(3), Card::new("a", "Bear"));

        assert_eq!(slot.id(), SlotId(3));
        assert_eq!(slot.card().name, "Bear");
        assert!(!slot.is_tapped());
        assert!(!slot.is_attacking());
        assert!(!slot.is_blocking());
    }

    #[test]
    fn test_untap_keeps_block() {
        let mut slot = CardSlot::new(SlotId(1), Card::new("a", "Bear"));
        slot.tapped = true;
        slot.attacking = true;
        slot.block_target = Some(SlotId(9));

        slot.untap();

        assert!(!slot.is_tapped());
        assert!(!slot.is_attacking());
        // Block bookkeeping belongs to the combat rules, not the slot.
        assert_eq!(slot.block_target(), Some(SlotId(9)));
    }
}
