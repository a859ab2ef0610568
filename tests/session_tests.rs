//! Session persistence against real stores.

use std::path::PathBuf;

use ccg_tabletop::cards::{Card, CardStats};
use ccg_tabletop::core::{CardPos, PlayerId, PlayerMap, StorageKeys, TableAction, TableConfig};
use ccg_tabletop::snapshot::{DirStore, KeyValueStore, MemoryStore, QuickSave};
use ccg_tabletop::table::TableSession;

const P0: PlayerId = PlayerId::FIRST;
const P1: PlayerId = PlayerId::SECOND;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ccg-tabletop-{}-{}", name, std::process::id()))
}

#[test]
fn test_dir_store_survives_restart() {
    let root = temp_dir("restart");
    let config = TableConfig::default().with_seed(5);

    {
        let mut session = TableSession::open(DirStore::open(&root).unwrap(), config.clone());
        session
            .apply(TableAction::AddCard {
                card: Card::new("bear", "Bear").with_power_toughness("2", "2"),
                zone: P0,
            })
            .unwrap();
        session
            .apply(TableAction::AddCard { card: Card::new("wall", "Wall"), zone: P1 })
            .unwrap();
        session.apply(TableAction::Attack { pos: CardPos::new(P0, 0) }).unwrap();
        session
            .apply(TableAction::Block { blocker: CardPos::new(P1, 0), target_index: 0 })
            .unwrap();
        session.apply(TableAction::SetHealth { player: P1, value: 38 }).unwrap();
        session.save_named("Mid combat").unwrap();
    }

    let session = TableSession::open(DirStore::open(&root).unwrap(), config);
    let table = session.table();

    assert_eq!(table.health(), &PlayerMap::from_pair(40, 38));
    assert_eq!(table.zones().block_target_pos(CardPos::new(P1, 0)), Some(CardPos::new(P0, 0)));
    assert_eq!(table.stats().get("bear"), Some(CardStats::new(2, 2)));
    assert_eq!(session.saved_tables().iter().next().map(|t| t.name.as_str()), Some("Mid combat"));
    assert!(root.join("mtg-blocking.json").exists());

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_unreadable_table_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.set("mtg-table", "][".to_string()).unwrap();
    store.set("mtg-blocking", r#"{"0:0":{"opponentArea":1,"opponentIdx":0}}"#.to_string()).unwrap();
    store.set("mtg-saved-tables", "[{}]".to_string()).unwrap();

    let session = TableSession::open(store, TableConfig::default());

    assert_eq!(session.table().zones().total_cards(), 0);
    assert_eq!(session.table().health(), &PlayerMap::with_value(40));
    assert!(session.saved_tables().is_empty());
    // The dangling block was dropped and the cleaned map written back.
    assert_eq!(session.store().get("mtg-blocking"), Some("{}".to_string()));
}

#[test]
fn test_custom_storage_keys() {
    let keys = StorageKeys {
        zones: "zones".to_string(),
        health: "life".to_string(),
        ..StorageKeys::default()
    };
    let config = TableConfig::default()
        .with_storage_keys(keys)
        .with_starting_health(20)
        .with_seed(9);
    let mut session = TableSession::open(MemoryStore::new(), config);

    session
        .apply(TableAction::AddCard { card: Card::new("elf", "Elf"), zone: P0 })
        .unwrap();
    session.apply(TableAction::ClearTable).unwrap();

    assert_eq!(session.store().get("life"), Some("[20,20]".to_string()));
    assert_eq!(session.store().get("zones"), Some("[[],[]]".to_string()));
    assert_eq!(session.store().get("mtg-table"), None);
}

#[test]
fn test_quick_save_persists_once() {
    let mut session = TableSession::open(MemoryStore::new(), TableConfig::default().with_seed(1));

    let name = match session.quick_save() {
        QuickSave::Saved(name) => name,
        QuickSave::AlreadySaved => panic!("fresh table reported as saved"),
    };
    assert_eq!(session.quick_save(), QuickSave::AlreadySaved);

    let raw = session.store().get("mtg-saved-tables").unwrap();
    assert!(raw.contains(&name));
    assert_eq!(raw.matches("\"name\"").count(), 1);
}

#[test]
fn test_malformed_saved_table_keeps_the_rest() {
    let good = r#"{"id":"100","name":"Good","data":{"playerAreas":[[{"id":"bear","name":"Bear"}],[]],"playerHealth":[40,40],"tapped":[[false],[]],"attacking":[[false],[]]}}"#;
    let bad = r#"{"id":"200","name":"Bad","data":{"playerAreas":[[],[]],"playerHealth":[40,40]}}"#;
    let mut store = MemoryStore::new();
    store.set("mtg-saved-tables", format!("[{},{}]", good, bad)).unwrap();

    let mut session = TableSession::open(store, TableConfig::default().with_seed(2));

    assert_eq!(session.saved_tables().len(), 1);
    assert_eq!(session.saved_tables().get("100").map(|t| t.name.as_str()), Some("Good"));

    assert!(matches!(session.quick_save(), QuickSave::Saved(_)));
    let raw = session.store().get("mtg-saved-tables").unwrap();
    assert!(raw.contains("\"name\":\"Good\""));
    assert!(!raw.contains("\"name\":\"Bad\""));
    assert_eq!(raw.matches("\"name\"").count(), 2);
}
