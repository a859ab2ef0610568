//! Tap, attack, block and untap transitions.
//!
//! Each card is in one of these derived states:
//!
//! ```text
//!              declare_attack (needs can_attack)
//!   Untapped ────────────────────────────────────▶ Attacking
//!      │  │      activate_ability (needs text)
//!      │  └────────────────────────────────────▶ Tapped
//!      │         declare_block (target attacking)
//!      └───────────────────────────────────────▶ Blocking(target)
//!
//!   any state ── untap ──▶ Untapped
//! ```
//!
//! Only one side may have attackers at a time, and every block must target
//! a card on the other side that is currently attacking. Every transition
//! checks its preconditions first and leaves the table untouched on error.

use smallvec::SmallVec;

use super::error::CombatError;
use crate::cards::Card;
use crate::core::{CardPos, PlayerId, TableError};
use crate::zones::ZoneStore;

/// An action a player can take with one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombatAction {
    Attack,
    ActivateAbility,
    Block,
    Untap,
}

/// Whether `zone` may declare attacks: the opponent has no attackers out.
#[must_use]
pub fn can_attack(store: &ZoneStore, zone: PlayerId) -> bool {
    !store.has_attackers(zone.opponent())
}

/// Tap a card to attack.
pub fn declare_attack(store: &mut ZoneStore, pos: CardPos) -> Result<(), TableError> {
    let slot = store.slot(pos)?;
    if !can_attack(store, pos.zone) {
        return Err(CombatError::AttackWhileOpponentAttacking { zone: pos.zone }.into());
    }
    if slot.is_tapped() {
        return Err(CombatError::AlreadyTapped(pos).into());
    }

    let slot = store.slot_mut(pos)?;
    slot.tapped = true;
    slot.attacking = true;
    Ok(())
}

/// Tap a card to activate its ability. The card does not attack.
pub fn activate_ability(store: &mut ZoneStore, pos: CardPos) -> Result<(), TableError> {
    let slot = store.slot(pos)?;
    if !slot.card().has_ability() {
        return Err(CombatError::NoAbility(pos).into());
    }
    if slot.is_tapped() {
        return Err(CombatError::AlreadyTapped(pos).into());
    }

    let slot = store.slot_mut(pos)?;
    slot.tapped = true;
    slot.attacking = false;
    Ok(())
}

/// Assign `blocker` to block the attacker at `target`.
///
/// Blocking costs no tap. A blocker has one target; assigning a new one
/// replaces the old.
pub fn declare_block(store: &mut ZoneStore, blocker: CardPos, target: CardPos) -> Result<(), TableError> {
    let blocker_slot = store.slot(blocker)?;
    if blocker_slot.is_tapped() || blocker_slot.is_attacking() {
        return Err(CombatError::BlockerUnavailable(blocker).into());
    }
    if target.zone == blocker.zone {
        return Err(CombatError::TargetInOwnZone { blocker, target }.into());
    }
    let target_slot = store.slot(target)?;
    if !target_slot.is_attacking() {
        return Err(CombatError::TargetNotAttacking { blocker, target }.into());
    }

    let target_id = target_slot.id();
    store.slot_mut(blocker)?.block_target = Some(target_id);
    Ok(())
}

/// Untap a card, ending its attack and its block.
///
/// Also drops every block aimed at this card, then sweeps the whole table
/// for blocks whose attacker is no longer attacking. The sweep repairs any
/// stale block left behind by an earlier state, not just this card's.
pub fn untap(store: &mut ZoneStore, pos: CardPos) -> Result<(), TableError> {
    let slot = store.slot_mut(pos)?;
    slot.untap();
    slot.block_target = None;
    let id = slot.id();

    store.release_blocks_on(id);
    store.retain_blocks(|target, store| {
        store.slot_by_id(target).is_some_and(|attacker| attacker.is_attacking())
    });
    Ok(())
}

/// The opponent's attackers that `blocker` could block, with their indices.
pub fn block_targets(store: &ZoneStore, blocker: CardPos) -> Result<Vec<(usize, &Card)>, TableError> {
    store.slot(blocker)?;
    Ok(store
        .attackers(blocker.zone.opponent())
        .map(|(index, slot)| (index, slot.card()))
        .collect())
}

/// Actions currently legal for the card at `pos`.
///
/// ```
/// use ccg_tabletop::cards::Card;
/// use ccg_tabletop::combat::{legal_actions, CombatAction};
/// use ccg_tabletop::core::PlayerId;
/// use ccg_tabletop::zones::ZoneStore;
///
/// let mut store = ZoneStore::new();
/// let pos = store.add_card(Card::new("bear", "Bear"), PlayerId::FIRST);
///
/// let actions = legal_actions(&store, pos).unwrap();
/// assert_eq!(actions.as_slice(), &[CombatAction::Attack]);
/// ```
pub fn legal_actions(store: &ZoneStore, pos: CardPos) -> Result<SmallVec<[CombatAction; 4]>, TableError> {
    let slot = store.slot(pos)?;
    let mut actions = SmallVec::new();

    if !slot.is_tapped() {
        if can_attack(store, pos.zone) {
            actions.push(CombatAction::Attack);
        }
        if slot.card().has_ability() {
            actions.push(CombatAction::ActivateAbility);
        }
        if !slot.is_attacking() && store.has_attackers(pos.zone.opponent()) {
            actions.push(CombatAction::Block);
        }
    }
    if slot.is_tapped() || slot.is_attacking() || slot.is_blocking() {
        actions.push(CombatAction::Untap);
    }
    Ok(actions)
}
