//! Randomized action sequences.
//!
//! These tests drive a `Table` with arbitrary (often illegal) actions and
//! check after every step that blocks stay consistent, at most one side is
//! attacking, rejected actions change nothing, and the table survives a
//! trip through its document form.

use ccg_tabletop::cards::Card;
use ccg_tabletop::core::{CardPos, PlayerId, TableAction};
use ccg_tabletop::snapshot::{restore, serialize};
use ccg_tabletop::table::Table;
use proptest::prelude::*;

fn card(kind: usize) -> Card {
    match kind {
        0 => Card::new("bear", "Bear").with_power_toughness("2", "2"),
        1 => Card::new("elf", "Elf")
            .with_oracle_text("{T}: Add {G}.")
            .with_power_toughness("1", "1"),
        2 => Card::new("wall", "Wall")
            .with_oracle_text("Defender")
            .with_power_toughness("0", "4"),
        _ => Card::new("token", "Token"),
    }
}

fn zone() -> impl Strategy<Value = PlayerId> {
    prop_oneof![Just(PlayerId::FIRST), Just(PlayerId::SECOND)]
}

fn pos() -> impl Strategy<Value = CardPos> {
    (zone(), 0usize..5).prop_map(|(zone, index)| CardPos::new(zone, index))
}

fn action() -> impl Strategy<Value = TableAction> {
    prop_oneof![
        3 => (0usize..4, zone()).prop_map(|(kind, zone)| TableAction::AddCard { card: card(kind), zone }),
        1 => pos().prop_map(|pos| TableAction::RemoveCard { pos }),
        1 => (pos(), zone()).prop_map(|(pos, to)| TableAction::MoveCardAt { pos, to }),
        1 => (0usize..4, zone(), zone())
            .prop_map(|(kind, from, to)| TableAction::MoveCard { card: card(kind), from, to }),
        3 => pos().prop_map(|pos| TableAction::Attack { pos }),
        1 => pos().prop_map(|pos| TableAction::ActivateAbility { pos }),
        3 => (pos(), 0usize..5).prop_map(|(blocker, target_index)| TableAction::Block { blocker, target_index }),
        2 => pos().prop_map(|pos| TableAction::Untap { pos }),
        1 => (zone(), -5i32..60).prop_map(|(player, value)| TableAction::SetHealth { player, value }),
    ]
}

fn assert_invariants(table: &Table) {
    let zones = table.zones();
    assert!(zones.blocks_consistent(), "stale block in {:?}", table.to_document());
    assert!(
        !(zones.has_attackers(PlayerId::FIRST) && zones.has_attackers(PlayerId::SECOND)),
        "both sides attacking"
    );

    let doc = table.to_document();
    let restored = restore(&doc);
    assert_eq!(restored.repairs, 0);
    assert_eq!(serialize(&restored.zones, &restored.health), doc);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_invariants_hold(actions in prop::collection::vec(action(), 1..60)) {
        let mut table = Table::new(40);
        for action in &actions {
            let before = table.to_document();
            if table.apply(action).is_err() {
                prop_assert_eq!(table.to_document(), before);
            }
            assert_invariants(&table);
        }
    }

    #[test]
    fn prop_untap_all_clears_combat(actions in prop::collection::vec(action(), 1..40)) {
        let mut table = Table::new(40);
        for action in &actions {
            let _ = table.apply(action);
        }

        for player in PlayerId::all() {
            for index in 0..table.zones().len(player) {
                table.untap(CardPos::new(player, index)).unwrap();
            }
        }

        let doc = table.to_document();
        prop_assert!(doc.blocking.is_empty());
        prop_assert!(doc.tapped.values().flatten().all(|tapped| !tapped));
        prop_assert!(doc.attacking.values().flatten().all(|attacking| !attacking));
    }
}
