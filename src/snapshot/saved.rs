//! Named snapshots of the table.

use std::time::{SystemTime, UNIX_EPOCH};

use im::Vector;
use serde::{Deserialize, Serialize};

use super::codec::same_state;
use super::document::TableDocument;
use crate::core::{TableError, TableRng};

/// A saved copy of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTable {
    /// Millisecond timestamp of the save, as a decimal string.
    pub id: String,
    pub name: String,
    pub data: TableDocument,
}

/// Outcome of a quick save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuickSave {
    /// Saved under the generated name.
    Saved(String),
    /// An identical table was already saved; nothing was written.
    AlreadySaved,
}

/// Saved tables, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedTables {
    tables: Vector<SavedTable>,
}

impl SavedTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedTable> {
        self.tables.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SavedTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Whether any saved table holds exactly `doc`.
    #[must_use]
    pub fn contains_state(&self, doc: &TableDocument) -> bool {
        self.tables.iter().any(|t| same_state(&t.data, doc))
    }

    /// Save under a random "Adjective Noun" name unless an identical table is
    /// already saved under any name.
    pub fn quick_save(&mut self, doc: &TableDocument, rng: &mut TableRng, now_ms: u64) -> QuickSave {
        if self.contains_state(doc) {
            return QuickSave::AlreadySaved;
        }
        let name = rng.table_name();
        self.push(name.clone(), doc.clone(), now_ms);
        QuickSave::Saved(name)
    }

    /// Save under a user-chosen name. Identical tables may be saved twice.
    pub fn save_named(&mut self, name: &str, doc: &TableDocument, now_ms: u64) -> Result<&SavedTable, TableError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TableError::EmptySnapshotName);
        }
        self.push(name.to_string(), doc.clone(), now_ms);
        self.tables.back().ok_or(TableError::EmptySnapshotName)
    }

    /// Remove a saved table, returning it.
    pub fn delete(&mut self, id: &str) -> Option<SavedTable> {
        let index = self.tables.iter().position(|t| t.id == id)?;
        Some(self.tables.remove(index))
    }

    fn push(&mut self, name: String, data: TableDocument, now_ms: u64) {
        let id = self.unique_id(now_ms);
        self.tables.push_back(SavedTable { id, name, data });
    }

    fn unique_id(&self, now_ms: u64) -> String {
        let mut stamp = now_ms;
        loop {
            let id = stamp.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }
}

impl FromIterator<SavedTable> for SavedTables {
    fn from_iter<I: IntoIterator<Item = SavedTable>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
