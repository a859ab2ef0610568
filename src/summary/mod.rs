//! Text renderings of the table for players and rules questions.

pub mod report;
pub mod states;

pub use report::generate_summary;
pub use states::{card_states, render_card_states, CardState, CardStateLine, NO_CARD_STATES};
