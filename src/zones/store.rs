//! Zone store for the two players' cards.
//!
//! The `ZoneStore` owns both zones as ordered lists of `CardSlot`s. It
//! supports:
//! - Appending cards to a zone
//! - Positional removal (a splice, later cards shift down)
//! - Moving cards between zones, by id (first copy) or by position
//! - Lookup by position or by slot identity
//!
//! Block targets are slot identities rather than positions, so a removal
//! only has to drop the blocks that pointed at the removed card. Every other
//! block keeps pointing at the same attacker even though indices shifted.

use im::Vector;
use smallvec::SmallVec;

use super::slot::CardSlot;
use crate::cards::Card;
use crate::core::{CardPos, PlayerId, PlayerMap, SlotId, TableError};

/// Both players' zones.
///
/// Zones are `im` vectors, so cloning the store for a snapshot or a
/// rendering pass is O(1).
///
/// ## Usage
///
/// ```
/// use ccg_tabletop::cards::Card;
/// use ccg_tabletop::core::{CardPos, PlayerId};
/// use ccg_tabletop::zones::ZoneStore;
///
/// let mut store = ZoneStore::new();
/// let bear = Card::new("bear", "Grizzly Bears");
///
/// let pos = store.add_card(bear.clone(), PlayerId::FIRST);
/// assert_eq!(pos, CardPos::new(PlayerId::FIRST, 0));
///
/// let moved = store.move_card(&bear, PlayerId::FIRST, PlayerId::SECOND).unwrap();
/// assert_eq!(moved, CardPos::new(PlayerId::SECOND, 0));
/// assert!(store.zone(PlayerId::FIRST).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneStore {
    zones: PlayerMap<Vector<CardSlot>>,
    next_slot: u32,
}

impl ZoneStore {
    /// Create a store with two empty zones.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Read access ===

    /// All slots in a zone, in positional order.
    #[must_use]
    pub fn zone(&self, player: PlayerId) -> &Vector<CardSlot> {
        &self.zones[player]
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, player: PlayerId) -> usize {
        self.zones[player].len()
    }

    /// Whether both zones are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.values().all(Vector::is_empty)
    }

    /// Number of cards across both zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.zones.values().map(Vector::len).sum()
    }

    /// The slot at a position, if any.
    #[must_use]
    pub fn get(&self, pos: CardPos) -> Option<&CardSlot> {
        self.zones[pos.zone].get(pos.index)
    }

    /// The slot at a position.
    pub fn slot(&self, pos: CardPos) -> Result<&CardSlot, TableError> {
        self.get(pos).ok_or(TableError::InvalidIndex {
            zone: pos.zone,
            index: pos.index,
        })
    }

    /// The card at a position.
    pub fn card(&self, pos: CardPos) -> Result<&Card, TableError> {
        self.slot(pos).map(CardSlot::card)
    }

    pub(crate) fn slot_mut(&mut self, pos: CardPos) -> Result<&mut CardSlot, TableError> {
        self.zones[pos.zone]
            .get_mut(pos.index)
            .ok_or(TableError::InvalidIndex {
                zone: pos.zone,
                index: pos.index,
            })
    }

    /// Current position of a slot.
    #[must_use]
    pub fn position_of(&self, id: SlotId) -> Option<CardPos> {
        self.iter()
            .find(|(_, slot)| slot.id == id)
            .map(|(pos, _)| pos)
    }

    /// Look up a slot by identity.
    #[must_use]
    pub fn slot_by_id(&self, id: SlotId) -> Option<&CardSlot> {
        self.iter().map(|(_, slot)| slot).find(|slot| slot.id == id)
    }

    /// Iterate over every slot: zone 0 first, then zone 1, each in order.
    pub fn iter(&self) -> impl Iterator<Item = (CardPos, &CardSlot)> {
        self.zones.iter().flat_map(|(player, zone)| {
            zone.iter()
                .enumerate()
                .map(move |(index, slot)| (CardPos::new(player, index), slot))
        })
    }

    /// Position of the first card in `zone` whose id matches.
    #[must_use]
    pub fn find_first(&self, zone: PlayerId, card_id: &str) -> Option<CardPos> {
        self.zones[zone]
            .iter()
            .position(|slot| slot.card.id == card_id)
            .map(|index| CardPos::new(zone, index))
    }

    // === Combat lookups ===

    /// A player's attacking cards with their indices.
    pub fn attackers(&self, player: PlayerId) -> impl Iterator<Item = (usize, &CardSlot)> {
        self.zones[player]
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.attacking)
    }

    /// Whether a player has any card attacking.
    #[must_use]
    pub fn has_attackers(&self, player: PlayerId) -> bool {
        self.attackers(player).next().is_some()
    }

    /// Current position of the attacker a card blocks.
    #[must_use]
    pub fn block_target_pos(&self, pos: CardPos) -> Option<CardPos> {
        let target = self.get(pos)?.block_target?;
        self.position_of(target)
    }

    /// Positions of every card blocking the slot at `attacker`.
    #[must_use]
    pub fn blockers_of(&self, attacker: CardPos) -> SmallVec<[CardPos; 4]> {
        let Some(target) = self.get(attacker).map(|slot| slot.id) else {
            return SmallVec::new();
        };
        self.iter()
            .filter(|(_, slot)| slot.block_target == Some(target))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Check that every block targets an attacking card in the other zone.
    #[must_use]
    pub fn blocks_consistent(&self) -> bool {
        self.iter().all(|(pos, slot)| match slot.block_target {
            None => true,
            Some(target) => match self.position_of(target) {
                Some(target_pos) => {
                    target_pos.zone == pos.zone.opponent()
                        && self.get(target_pos).is_some_and(|t| t.attacking)
                }
                None => false,
            },
        })
    }

    // === Mutation ===

    fn alloc_slot(&mut self) -> SlotId {
        let id = SlotId(self.next_slot);
        self.next_slot += 1;
        id
    }

    /// Append a card to a zone, untapped and idle.
    pub fn add_card(&mut self, card: Card, zone: PlayerId) -> CardPos {
        let id = self.alloc_slot();
        self.zones[zone].push_back(CardSlot::new(id, card));
        CardPos::new(zone, self.zones[zone].len() - 1)
    }

    /// Append a card with restored flags. Returns its slot identity.
    pub(crate) fn push_restored(
        &mut self,
        zone: PlayerId,
        card: Card,
        tapped: bool,
        attacking: bool,
    ) -> SlotId {
        let id = self.alloc_slot();
        let mut slot = CardSlot::new(id, card);
        slot.tapped = tapped;
        slot.attacking = attacking;
        self.zones[zone].push_back(slot);
        id
    }

    /// Remove the card at a position.
    ///
    /// Later cards in the zone shift down by one. The removed card's own
    /// block disappears with it, and every block that targeted it is cleared.
    pub fn remove_card(&mut self, pos: CardPos) -> Result<Card, TableError> {
        self.slot(pos)?;
        let removed = self.zones[pos.zone].remove(pos.index);
        self.release_blocks_on(removed.id);
        Ok(removed.card)
    }

    /// Move the first copy of `card` found in `from` to the end of `to`.
    ///
    /// Copies share an id, so this cannot tell them apart; prefer
    /// `move_card_at` when the caller knows the position. Moving within the
    /// same zone leaves the card where it is.
    pub fn move_card(&mut self, card: &Card, from: PlayerId, to: PlayerId) -> Result<CardPos, TableError> {
        let pos = self
            .find_first(from, &card.id)
            .ok_or_else(|| TableError::CardNotFound {
                zone: from,
                card_id: card.id.clone(),
            })?;
        self.move_card_at(pos, to)
    }

    /// Move the card at `pos` to the end of `to` with fresh flags.
    ///
    /// Cascades like `remove_card`. A move into the same zone is a no-op.
    pub fn move_card_at(&mut self, pos: CardPos, to: PlayerId) -> Result<CardPos, TableError> {
        self.slot(pos)?;
        if pos.zone == to {
            return Ok(pos);
        }
        let card = self.remove_card(pos)?;
        Ok(self.add_card(card, to))
    }

    /// Empty both zones.
    pub fn clear(&mut self) {
        for (_, zone) in self.zones.iter_mut() {
            zone.clear();
        }
    }

    /// Drop every block that targets `attacker`.
    pub(crate) fn release_blocks_on(&mut self, attacker: SlotId) {
        self.retain_blocks(|target, _| target != attacker);
    }

    /// Keep only blocks for which `keep(target, store)` holds.
    pub(crate) fn retain_blocks(&mut self, keep: impl Fn(SlotId, &ZoneStore) -> bool) {
        let doomed: SmallVec<[CardPos; 4]> = self
            .iter()
            .filter(|(_, slot)| slot.block_target.is_some_and(|target| !keep(target, self)))
            .map(|(pos, _)| pos)
            .collect();

        for pos in doomed {
            if let Some(slot) = self.zones[pos.zone].get_mut(pos.index) {
                slot.block_target = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card::new(id, id.to_uppercase())
    }

    fn pos(zone: PlayerId, index: usize) -> CardPos {
        CardPos::new(zone, index)
    }

    const P0: PlayerId = PlayerId::FIRST;
    const P1: PlayerId = PlayerId::SECOND;

    #[test]
    fn test_add_appends_in_order() {
        let mut store = ZoneStore::new();

        store.add_card(card("a"), P0);
        store.add_card(card("b"), P0);
        let last = store.add_card(card("c"), P0);

        assert_eq!(last, pos(P0, 2));
        let ids: Vec<_> = store.zone(P0).iter().map(|s| s.card().id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.len(P1), 0);
        assert_eq!(store.total_cards(), 3);
    }

    #[test]
    fn test_slot_ids_are_unique() {
        let mut store = ZoneStore::new();

        store.add_card(card("a"), P0);
        store.add_card(card("a"), P0);

        let a = store.slot(pos(P0, 0)).unwrap().id();
        let b = store.slot(pos(P0, 1)).unwrap().id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_is_positional() {
        let mut store = ZoneStore::new();
        store.add_card(card("x"), P0);
        store.add_card(card("x"), P0);
        store.add_card(card("y"), P0);
        let second_x = store.slot(pos(P0, 1)).unwrap().id();

        let removed = store.remove_card(pos(P0, 0)).unwrap();

        assert_eq!(removed.id, "x");
        assert_eq!(store.len(P0), 2);
        assert_eq!(store.position_of(second_x), Some(pos(P0, 0)));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = ZoneStore::new();
        store.add_card(card("a"), P0);

        assert_eq!(
            store.remove_card(pos(P0, 1)),
            Err(TableError::InvalidIndex { zone: P0, index: 1 })
        );
        assert_eq!(store.len(P0), 1);
    }

    #[test]
    fn test_remove_clears_blocks_on_removed_attacker() {
        let mut store = ZoneStore::new();
        store.add_card(card("atk"), P0);
        store.add_card(card("def"), P1);
        let attacker = store.slot(pos(P0, 0)).unwrap().id();
        store.slot_mut(pos(P0, 0)).unwrap().attacking = true;
        store.slot_mut(pos(P1, 0)).unwrap().block_target = Some(attacker);

        store.remove_card(pos(P0, 0)).unwrap();

        assert!(!store.slot(pos(P1, 0)).unwrap().is_blocking());
    }

    #[test]
    fn test_move_first_match() {
        let mut store = ZoneStore::new();
        store.add_card(card("a"), P0);
        store.add_card(card("b"), P0);
        store.add_card(card("b"), P0);
        let first_b = store.slot(pos(P0, 1)).unwrap().id();

        let moved = store.move_card(&card("b"), P0, P1).unwrap();

        assert_eq!(moved, pos(P1, 0));
        assert_eq!(store.len(P0), 2);
        assert_eq!(store.position_of(first_b), None);
        assert_eq!(store.card(pos(P0, 1)).unwrap().id, "b");
    }

    #[test]
    fn test_move_resets_flags() {
        let mut store = ZoneStore::new();
        store.add_card(card("a"), P0);
        {
            let slot = store.slot_mut(pos(P0, 0)).unwrap();
            slot.tapped = true;
            slot.attacking = true;
        }

        let moved = store.move_card_at(pos(P0, 0), P1).unwrap();

        let slot = store.slot(moved).unwrap();
        assert!(!slot.is_tapped());
        assert!(!slot.is_attacking());
    }

    #[test]
    fn test_move_missing_card() {
        let mut store = ZoneStore::new();
        store.add_card(card("a"), P0);

        let err = store.move_card(&card("zzz"), P0, P1).unwrap_err();
        assert_eq!(err, TableError::CardNotFound { zone: P0, card_id: "zzz".to_string() });
        // Nothing was appended to the destination.
        assert_eq!(store.len(P1), 0);
    }

    #[test]
    fn test_move_same_zone_is_noop() {
        let mut store = ZoneStore::new();
        store.add_card(card("a"), P0);
        store.add_card(card("b"), P0);

        let at = store.move_card(&card("a"), P0, P0).unwrap();

        assert_eq!(at, pos(P0, 0));
        assert_eq!(store.card(pos(P0, 0)).unwrap().id, "a");
        assert_eq!(store.len(P0), 2);
    }

    #[test]
    fn test_blockers_of() {
        let mut store = ZoneStore::new();
        store.add_card(card("atk"), P0);
        store.add_card(card("d1"), P1);
        store.add_card(card("d2"), P1);
        let attacker = store.slot(pos(P0, 0)).unwrap().id();
        store.slot_mut(pos(P0, 0)).unwrap().attacking = true;
        store.slot_mut(pos(P1, 0)).unwrap().block_target = Some(attacker);
        store.slot_mut(pos(P1, 1)).unwrap().block_target = Some(attacker);

        let blockers = store.blockers_of(pos(P0, 0));
        assert_eq!(blockers.as_slice(), &[pos(P1, 0), pos(P1, 1)]);
        assert_eq!(store.block_target_pos(pos(P1, 1)), Some(pos(P0, 0)));
        assert!(store.blocks_consistent());
    }

    #[test]
    fn test_clear() {
        let mut store = ZoneStore::new();
        store.add_card(card("a"), P0);
        store.add_card(card("b"), P1);

        store.clear();

        assert!(store.is_empty());
    }
}
