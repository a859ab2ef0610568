//! The table as the view layer sees it.
//!
//! ## Key Types
//!
//! - `Table`: Zones, life totals and stat overrides, mutated by `TableAction`
//! - `TableSession`: A `Table` kept in sync with a `KeyValueStore`

pub mod session;
pub mod state;

pub use session::TableSession;
pub use state::Table;
