//! The "Card States" panel: one line per card doing something in combat.

use crate::cards::CardStatsTable;
use crate::combat::TapStatus;
use crate::core::CardPos;
use crate::zones::ZoneStore;

use super::report::name_with_stats;

/// Shown when no card blocks, attacks or has activated an ability.
pub const NO_CARD_STATES: &str = "No cards are currently attacking or have activated abilities.";

/// The single most important state of a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardState {
    /// Blocking the named attacker.
    Blocking(String),
    Attacking,
    ActivatedAbility,
    Tapped,
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardState::Blocking(name) => write!(f, "[Blocking {}]", name),
            CardState::Attacking => write!(f, "[Attacking]"),
            CardState::ActivatedAbility => write!(f, "[Activated Ability]"),
            CardState::Tapped => write!(f, "[Tapped]"),
        }
    }
}

/// One panel line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardStateLine {
    pub pos: CardPos,
    /// Card name, with power/toughness when known.
    pub label: String,
    pub state: CardState,
}

impl std::fmt::Display for CardStateLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.pos.zone, self.label, self.state)
    }
}

/// Panel lines for every card with a visible state, zone by zone.
///
/// Blocking wins over attacking, attacking over an activated ability, and an
/// activated ability over a plain tap.
#[must_use]
pub fn card_states(zones: &ZoneStore, stats: &CardStatsTable) -> Vec<CardStateLine> {
    zones
        .iter()
        .filter_map(|(pos, slot)| {
            let state = match zones.block_target_pos(pos).and_then(|target| zones.get(target)) {
                Some(target) => CardState::Blocking(target.card().name.clone()),
                None => match TapStatus::of(slot) {
                    TapStatus::Attacking => CardState::Attacking,
                    TapStatus::ActivatedAbility => CardState::ActivatedAbility,
                    TapStatus::Tapped => CardState::Tapped,
                    TapStatus::Untapped => return None,
                },
            };
            Some(CardStateLine {
                pos,
                label: name_with_stats(slot.card(), stats),
                state,
            })
        })
        .collect()
}

/// Render the panel, one line per entry.
///
/// Plainly tapped cards alone do not count as activity, so a table where
/// only lands are tapped lists them and still ends with the empty message.
#[must_use]
pub fn render_card_states(zones: &ZoneStore, stats: &CardStatsTable) -> String {
    let lines = card_states(zones, stats);
    let mut out: Vec<String> = lines.iter().map(ToString::to_string).collect();
    if lines.iter().all(|line| line.state == CardState::Tapped) {
        out.push(NO_CARD_STATES.to_string());
    }
    out.join("\n")
}
