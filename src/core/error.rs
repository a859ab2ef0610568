//! Error types for table mutations.
//!
//! Combat-specific rejections live in `crate::combat::CombatError` and are
//! wrapped here as `TableError::IllegalCombat`. Persistence problems use
//! `crate::snapshot::RestoreError` and never reach the caller as hard failures.

use super::player::PlayerId;
use crate::combat::CombatError;

/// Errors returned by table and zone operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A raw zone index outside `{0, 1}`.
    InvalidZone(usize),
    /// No card at this position.
    InvalidIndex { zone: PlayerId, index: usize },
    /// No card with this id in the zone.
    CardNotFound { zone: PlayerId, card_id: String },
    /// The combat transition is not legal in the current state.
    IllegalCombat(CombatError),
    /// No saved table with this id.
    SnapshotNotFound(String),
    /// A named save was requested with a blank name.
    EmptySnapshotName,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::InvalidZone(zone) => {
                write!(f, "Zone index {} is out of range (expected 0 or 1)", zone)
            }
            TableError::InvalidIndex { zone, index } => {
                write!(f, "{} has no card at index {}", zone, index)
            }
            TableError::CardNotFound { zone, card_id } => {
                write!(f, "{} has no card with id {:?}", zone, card_id)
            }
            TableError::IllegalCombat(err) => write!(f, "Illegal combat action: {}", err),
            TableError::SnapshotNotFound(id) => write!(f, "Saved table {:?} not found", id),
            TableError::EmptySnapshotName => write!(f, "Saved table name must not be blank"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::IllegalCombat(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CombatError> for TableError {
    fn from(err: CombatError) -> Self {
        TableError::IllegalCombat(err)
    }
}
