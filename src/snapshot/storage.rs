//! Key-value persistence for the live table.
//!
//! The host provides a text key-value store. Each piece of live state
//! (zones, life, tapped flags, attacking flags, blocks, saved tables, stat
//! overrides) lives under its own key and is read once at startup and
//! rewritten whenever an action touches it.
//!
//! A key that is missing or holds garbage falls back to its default on its
//! own; a bad `tapped` value does not discard the zones. Inside a key, list
//! and map entries are read one at a time, so one bad saved table or block
//! does not discard its neighbours.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::warn;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::document::{BlockTarget, TableDocument};
use crate::core::{PlayerMap, StorageKey, StorageKeys};

/// Why a write did not reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend failed to write.
    Io(String),
    /// The key cannot be stored by this backend.
    InvalidKey(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(reason) => write!(f, "Storage write failed: {}", reason),
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key {:?}", key),
        }
    }
}

impl std::error::Error for StorageError {}

/// A text key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Use `root` as the storage directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("storage: cannot read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::write(path, value).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

/// Read and parse a JSON value. Missing keys and malformed values give `None`.
pub fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("storage: ignoring malformed value under {:?}: {}", key, e);
            None
        }
    }
}

/// Read a JSON array, keeping the elements that parse.
///
/// Returns `None` only when the key is missing or is not an array.
pub fn read_json_list<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<Vec<T>> {
    let items: Vec<Value> = read_json(store, key)?;
    let entries = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("storage: dropping malformed entry {} under {:?}: {}", index, key, e);
                None
            }
        })
        .collect();
    Some(entries)
}

/// Per-zone flag lists. A non-boolean flag reads as `false` so later flags
/// keep their positions.
fn read_flags(store: &impl KeyValueStore, key: &str) -> Option<PlayerMap<Vec<bool>>> {
    let [first, second]: [Vec<Value>; 2] = read_json(store, key)?;
    let flags = |values: Vec<Value>| -> Vec<bool> {
        values
            .into_iter()
            .map(|value| {
                value.as_bool().unwrap_or_else(|| {
                    warn!("storage: non-boolean flag {} under {:?}; reading as false", value, key);
                    false
                })
            })
            .collect()
    };
    Some(PlayerMap::from_pair(flags(first), flags(second)))
}

/// Blocking entries, dropping the ones whose target does not parse.
fn read_blocking(store: &impl KeyValueStore, key: &str) -> Option<BTreeMap<String, BlockTarget>> {
    let entries: Map<String, Value> = read_json(store, key)?;
    let blocking = entries
        .into_iter()
        .filter_map(|(blocker, target)| match serde_json::from_value(target) {
            Ok(target) => Some((blocker, target)),
            Err(e) => {
                warn!("storage: dropping malformed block {:?} under {:?}: {}", blocker, key, e);
                None
            }
        })
        .collect();
    Some(blocking)
}

/// Serialize and write a JSON value.
pub fn write_json<T: Serialize>(store: &mut impl KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Io(e.to_string()))?;
    store.set(key, json)
}

/// Resolve a storage key to its configured name.
#[must_use]
pub fn key_name(keys: &StorageKeys, key: StorageKey) -> &str {
    match key {
        StorageKey::Zones => &keys.zones,
        StorageKey::Health => &keys.health,
        StorageKey::Tapped => &keys.tapped,
        StorageKey::Attacking => &keys.attacking,
        StorageKey::Blocking => &keys.blocking,
        StorageKey::CardStats => &keys.card_stats,
        StorageKey::SavedTables => &keys.saved_tables,
    }
}

/// Assemble the live table document from its five keys.
///
/// Each key falls back to its own default. The result may be inconsistent
/// (flag lists of the wrong length, stale blocks); `codec::restore` repairs it.
pub fn load_document(store: &impl KeyValueStore, keys: &StorageKeys, starting_health: i32) -> TableDocument {
    let mut doc = TableDocument::empty(starting_health);

    if let Some(areas) = read_json(store, &keys.zones) {
        doc.player_areas = areas;
    }
    if let Some(health) = read_json(store, &keys.health) {
        doc.player_health = health;
    }
    if let Some(tapped) = read_flags(store, &keys.tapped) {
        doc.tapped = tapped;
    }
    if let Some(attacking) = read_flags(store, &keys.attacking) {
        doc.attacking = attacking;
    }
    if let Some(blocking) = read_blocking(store, &keys.blocking) {
        doc.blocking = blocking;
    }
    doc
}

/// Write one live-table field of `doc` under its key.
///
/// `CardStats` and `SavedTables` are not part of the document and are
/// ignored here.
pub fn store_field(
    store: &mut impl KeyValueStore,
    keys: &StorageKeys,
    doc: &TableDocument,
    key: StorageKey,
) -> Result<(), StorageError> {
    let name = key_name(keys, key);
    match key {
        StorageKey::Zones => write_json(store, name, &doc.player_areas),
        StorageKey::Health => write_json(store, name, &doc.player_health),
        StorageKey::Tapped => write_json(store, name, &doc.tapped),
        StorageKey::Attacking => write_json(store, name, &doc.attacking),
        StorageKey::Blocking => write_json(store, name, &doc.blocking),
        StorageKey::CardStats | StorageKey::SavedTables => Ok(()),
    }
}
