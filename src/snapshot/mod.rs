//! Table persistence: the document format, its codec, key-value storage and
//! saved tables.
//!
//! ## Key Types
//!
//! - `TableDocument`: Plain-data table state in the client's JSON shape
//! - `KeyValueStore`: Where the live table and saved tables are kept
//! - `SavedTables`: Named snapshots, with duplicate suppression on quick save

pub mod codec;
pub mod document;
pub mod saved;
pub mod storage;

pub use codec::{deserialize, restore, same_state, serialize, to_json, RestoreError, RestoredTable};
pub use document::{BlockTarget, TableDocument};
pub use saved::{now_millis, QuickSave, SavedTable, SavedTables};
pub use storage::{
    key_name, load_document, read_json, read_json_list, store_field, write_json, DirStore, KeyValueStore,
    MemoryStore, StorageError,
};
