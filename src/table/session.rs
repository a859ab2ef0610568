//! A table bound to persistent storage.
//!
//! The session reads every storage key once when it opens. After that the
//! in-memory `Table` is authoritative: each action is applied synchronously
//! and then only the keys it touched are rewritten. A failed write is logged
//! and otherwise ignored, so storage trouble never blocks play.

use log::{debug, info, warn};

use super::state::Table;
use crate::cards::CardStatsTable;
use crate::core::{StorageKey, TableAction, TableConfig, TableError, TableRng};
use crate::snapshot::{
    key_name, load_document, now_millis, read_json, read_json_list, store_field, write_json, KeyValueStore,
    QuickSave, SavedTable, SavedTables,
};

/// A live table persisted to a key-value store.
///
/// ```
/// use ccg_tabletop::cards::Card;
/// use ccg_tabletop::core::{PlayerId, TableAction, TableConfig};
/// use ccg_tabletop::snapshot::{KeyValueStore, MemoryStore};
/// use ccg_tabletop::table::TableSession;
///
/// let mut session = TableSession::open(MemoryStore::new(), TableConfig::default());
/// session
///     .apply(TableAction::AddCard { card: Card::new("bear", "Bear"), zone: PlayerId::FIRST })
///     .unwrap();
///
/// assert!(session.store().get("mtg-table").is_some());
/// ```
pub struct TableSession<S: KeyValueStore> {
    store: S,
    config: TableConfig,
    table: Table,
    saved: SavedTables,
    rng: TableRng,
}

impl<S: KeyValueStore> TableSession<S> {
    /// Load the table, stat overrides and saved tables from `store`.
    ///
    /// Keys that are missing or malformed fall back to defaults one by one.
    /// A malformed saved table is dropped without losing the others. If the
    /// stored table needed repairs, the repaired table is written back.
    pub fn open(store: S, config: TableConfig) -> Self {
        let keys = &config.storage_keys;
        let doc = load_document(&store, keys, config.starting_health);
        let stats: CardStatsTable = read_json(&store, &keys.card_stats).unwrap_or_default();
        let saved: SavedTables = read_json_list::<SavedTable>(&store, &keys.saved_tables)
            .map(|tables| tables.into_iter().collect())
            .unwrap_or_default();

        let mut table = Table::new(config.starting_health);
        let repairs = table.restore_document(&doc);
        table.restore_stats(stats);

        info!(
            "session: opened table with {} cards, {} saved tables",
            table.zones().total_cards(),
            saved.len()
        );

        let rng = TableRng::from_optional_seed(config.seed);
        let mut session = Self {
            store,
            config,
            table,
            saved,
            rng,
        };
        if repairs > 0 {
            warn!("session: repaired {} inconsistencies in stored table", repairs);
            session.persist(&StorageKey::TABLE);
        }
        session
    }

    // === Accessors ===

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn saved_tables(&self) -> &SavedTables {
        &self.saved
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the session, handing back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    // === Mutation ===

    /// Apply an action and persist the keys it touched.
    pub fn apply(&mut self, action: TableAction) -> Result<(), TableError> {
        self.table.apply(&action)?;
        debug!("session: applied {}", action.name());
        self.persist(&action.touched_keys());
        Ok(())
    }

    /// Save the table under a generated name unless it is already saved.
    pub fn quick_save(&mut self) -> QuickSave {
        let doc = self.table.to_document();
        let outcome = self.saved.quick_save(&doc, &mut self.rng, now_millis());
        match &outcome {
            QuickSave::Saved(name) => {
                info!("session: saved table as {:?}", name);
                self.persist(&[StorageKey::SavedTables]);
            }
            QuickSave::AlreadySaved => info!("session: table already saved"),
        }
        outcome
    }

    /// Save the table under `name`.
    pub fn save_named(&mut self, name: &str) -> Result<SavedTable, TableError> {
        let doc = self.table.to_document();
        let saved = self.saved.save_named(name, &doc, now_millis())?.clone();
        info!("session: saved table as {:?} ({})", saved.name, saved.id);
        self.persist(&[StorageKey::SavedTables]);
        Ok(saved)
    }

    /// Replace the live table with a saved one.
    pub fn restore_snapshot(&mut self, id: &str) -> Result<(), TableError> {
        let data = self
            .saved
            .get(id)
            .map(|saved| saved.data.clone())
            .ok_or_else(|| TableError::SnapshotNotFound(id.to_string()))?;

        let repairs = self.table.restore_document(&data);
        info!("session: restored saved table {} ({} repairs)", id, repairs);
        self.persist(&StorageKey::TABLE);
        Ok(())
    }

    /// Delete a saved table.
    pub fn delete_snapshot(&mut self, id: &str) -> Result<SavedTable, TableError> {
        let removed = self
            .saved
            .delete(id)
            .ok_or_else(|| TableError::SnapshotNotFound(id.to_string()))?;
        info!("session: deleted saved table {:?}", removed.name);
        self.persist(&[StorageKey::SavedTables]);
        Ok(removed)
    }

    // === Persistence ===

    fn persist(&mut self, keys: &[StorageKey]) {
        let doc = keys
            .iter()
            .any(|key| StorageKey::TABLE.contains(key))
            .then(|| self.table.to_document());
        let names = &self.config.storage_keys;

        for &key in keys {
            let result = match key {
                StorageKey::CardStats => write_json(&mut self.store, &names.card_stats, self.table.stats()),
                StorageKey::SavedTables => write_json(&mut self.store, &names.saved_tables, &self.saved),
                _ => match &doc {
                    Some(doc) => store_field(&mut self.store, names, doc, key),
                    None => Ok(()),
                },
            };
            if let Err(err) = result {
                warn!("session: could not persist {}: {}", key_name(names, key), err);
            }
        }
    }
}
