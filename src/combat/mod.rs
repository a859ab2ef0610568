//! Combat state machine: tapping, attacking, blocking, untapping.
//!
//! Combat state is not a stored enum. It lives in each slot's flags and is
//! changed only through the transitions in `rules`, which refuse illegal
//! input with a `CombatError` instead of ignoring it.
//!
//! ## Key Types
//!
//! - `CombatAction`: What a player may do with a card right now
//! - `CardRole` / `TapStatus`: A card's derived combat role
//! - `CombatError`: Why a transition was refused

pub mod error;
pub mod role;
pub mod rules;

pub use error::CombatError;
pub use role::{role, CardRole, TapStatus};
pub use rules::{
    activate_ability, block_targets, can_attack, declare_attack, declare_block, legal_actions,
    untap, CombatAction,
};
