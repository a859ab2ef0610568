//! Card records, power/toughness overrides, and the registry seam.
//!
//! ## Key Types
//!
//! - `Card`: Immutable card record from the registry
//! - `CardStats`: A power/toughness pair
//! - `CardStatsTable`: User overrides keyed by card id
//! - `CardRegistry`: Trait for the external card database
//! - `CachedRegistry`: Memoizing wrapper that never fails outward
//! - `SearchCoordinator`: Cancellation for in-flight searches

pub mod card;
pub mod stats;
pub mod registry;

pub use card::Card;
pub use stats::{CardStats, CardStatsTable};
pub use registry::{
    CachedRegistry, CardRegistry, RegistryError, SearchCoordinator, SearchToken,
};
