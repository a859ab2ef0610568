//! Plain-text match summary.
//!
//! The summary is meant to be pasted into a rules question, so its wording
//! is fixed:
//!
//! ```text
//! Player 1: 40 life, Player 2: 37 life.
//! Player 1 controls: Bear 2/2 [attacking] Player 2 controls: Wall 0/4 [blocking Bear]
//!
//! Card Abilities in Play:
//! - Bear: (No abilities)
//! - Wall: Defender
//! ```

use crate::cards::{Card, CardStatsTable};
use crate::combat::TapStatus;
use crate::core::{PlayerId, PlayerMap};
use crate::zones::{CardSlot, ZoneStore};

/// Render the summary for the current table.
#[must_use]
pub fn generate_summary(health: &PlayerMap<i32>, zones: &ZoneStore, stats: &CardStatsTable) -> String {
    let life = format!(
        "{}: {} life, {}: {} life.",
        PlayerId::FIRST,
        health[PlayerId::FIRST],
        PlayerId::SECOND,
        health[PlayerId::SECOND]
    );

    let board = PlayerId::all()
        .map(|player| zone_line(player, zones, stats))
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = format!("{}\n{}", life, board);
    if !zones.is_empty() {
        out.push_str("\n\nCard Abilities in Play:\n");
        let abilities = zones
            .iter()
            .map(|(_, slot)| ability_line(slot.card()))
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&abilities);
    }
    out
}

fn zone_line(player: PlayerId, zones: &ZoneStore, stats: &CardStatsTable) -> String {
    let zone = zones.zone(player);
    if zone.is_empty() {
        return format!("{} has no cards on the battlefield.", player);
    }
    let cards = zone
        .iter()
        .map(|slot| card_entry(slot, zones, stats))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} controls: {}", player, cards)
}

fn card_entry(slot: &CardSlot, zones: &ZoneStore, stats: &CardStatsTable) -> String {
    let mut states: Vec<String> = Vec::new();
    if let Some(label) = TapStatus::of(slot).label() {
        states.push(label.to_string());
    }
    if let Some(target) = slot.block_target().and_then(|id| zones.slot_by_id(id)) {
        states.push(format!("blocking {}", target.card().name));
    }

    let mut entry = name_with_stats(slot.card(), stats);
    if !states.is_empty() {
        entry.push_str(&format!(" [{}]", states.join(", ")));
    }
    entry
}

/// `Name` or `Name P/T`, using the override when one exists.
pub(crate) fn name_with_stats(card: &Card, stats: &CardStatsTable) -> String {
    match stats.effective(card) {
        Some(pt) => format!("{} {}", card.name, pt),
        None => card.name.clone(),
    }
}

fn ability_line(card: &Card) -> String {
    match card.ability_text() {
        Some(text) => format!("- {}: {}", card.name, text.replace('\n', " ")),
        None => format!("- {}: (No abilities)", card.name),
    }
}
