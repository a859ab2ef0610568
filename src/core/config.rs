//! Table configuration.
//!
//! Hosts configure the engine at startup with a `TableConfig`:
//! - Starting life totals and the range input surfaces clamp to
//! - Storage key names for each persisted field
//! - An optional RNG seed for reproducible quick-save names

use serde::{Deserialize, Serialize};

/// Names of the keys the session reads and writes in its key-value store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Both zones' card lists.
    pub zones: String,
    /// Life totals.
    pub health: String,
    /// Tapped flags per zone.
    pub tapped: String,
    /// Attacking flags per zone.
    pub attacking: String,
    /// Blocking map (`"zone:index"` -> target).
    pub blocking: String,
    /// The list of saved tables.
    pub saved_tables: String,
    /// Power/toughness overrides by card id.
    pub card_stats: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            zones: "mtg-table".to_string(),
            health: "mtg-health".to_string(),
            tapped: "mtg-tapped".to_string(),
            attacking: "mtg-attacking".to_string(),
            blocking: "mtg-blocking".to_string(),
            saved_tables: "mtg-saved-tables".to_string(),
            card_stats: "mtg-card-stats".to_string(),
        }
    }
}

/// Table configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Life total for both players on a fresh or cleared table.
    pub starting_health: i32,

    /// Lowest life total an input surface should accept.
    /// The engine itself stores whatever it is given.
    pub min_health: i32,

    /// Highest life total an input surface should accept.
    pub max_health: i32,

    /// Storage key names.
    pub storage_keys: StorageKeys,

    /// Seed for quick-save names. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_health: 40,
            min_health: 0,
            max_health: 999,
            storage_keys: StorageKeys::default(),
            seed: None,
        }
    }
}

impl TableConfig {
    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the accepted input range for life totals.
    #[must_use]
    pub fn with_health_bounds(mut self, min: i32, max: i32) -> Self {
        self.min_health = min;
        self.max_health = max;
        self
    }

    /// Set custom storage keys.
    #[must_use]
    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    /// Set a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clamp a life total typed into an input surface.
    #[must_use]
    pub fn clamp_health(&self, value: i32) -> i32 {
        value.clamp(self.min_health, self.max_health.max(self.min_health))
    }
}
