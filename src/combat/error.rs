//! Combat rejection reasons.

use crate::core::{CardPos, PlayerId};

/// Why a combat transition was refused.
///
/// A refused transition leaves the table untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    /// The opponent already has attackers out.
    AttackWhileOpponentAttacking { zone: PlayerId },
    /// The card is already tapped.
    AlreadyTapped(CardPos),
    /// The card has no ability text to activate.
    NoAbility(CardPos),
    /// The would-be blocker is tapped or attacking.
    BlockerUnavailable(CardPos),
    /// The chosen block target is not attacking.
    TargetNotAttacking { blocker: CardPos, target: CardPos },
    /// The chosen block target is on the blocker's own side.
    TargetInOwnZone { blocker: CardPos, target: CardPos },
}

impl std::fmt::Display for CombatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatError::AttackWhileOpponentAttacking { zone } => {
                write!(f, "{} cannot attack while the opponent is attacking", zone)
            }
            CombatError::AlreadyTapped(pos) => write!(f, "Card at {} is already tapped", pos),
            CombatError::NoAbility(pos) => write!(f, "Card at {} has no ability to activate", pos),
            CombatError::BlockerUnavailable(pos) => {
                write!(f, "Card at {} is tapped or attacking and cannot block", pos)
            }
            CombatError::TargetNotAttacking { blocker, target } => {
                write!(f, "Card at {} cannot block {}: it is not attacking", blocker, target)
            }
            CombatError::TargetInOwnZone { blocker, target } => {
                write!(f, "Card at {} cannot block {} on its own side", blocker, target)
            }
        }
    }
}

impl std::error::Error for CombatError {}
