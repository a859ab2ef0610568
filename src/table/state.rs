//! The live table: both zones, life totals and stat overrides.
//!
//! `Table` is the one place that mutates all three together. Every user
//! action funnels through `Table::apply`, which either changes the table or
//! returns an error and leaves it untouched.

use log::warn;
use smallvec::SmallVec;

use crate::cards::{Card, CardStats, CardStatsTable};
use crate::combat::{self, CombatAction};
use crate::core::{CardPos, PlayerId, PlayerMap, TableAction, TableError};
use crate::snapshot::{self, RestoreError, TableDocument};
use crate::summary;
use crate::zones::ZoneStore;

/// Complete live table state.
#[derive(Clone, Debug)]
pub struct Table {
    zones: ZoneStore,
    health: PlayerMap<i32>,
    stats: CardStatsTable,
    starting_health: i32,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(40)
    }
}

impl Table {
    /// An empty table with both players at `starting_health`.
    #[must_use]
    pub fn new(starting_health: i32) -> Self {
        Self {
            zones: ZoneStore::new(),
            health: PlayerMap::with_value(starting_health),
            stats: CardStatsTable::new(),
            starting_health,
        }
    }

    /// Restore a table from JSON, falling back to an empty one when the
    /// document cannot be read.
    #[must_use]
    pub fn from_json(json: &str, starting_health: i32) -> Self {
        let mut table = Self::new(starting_health);
        match snapshot::deserialize(json) {
            Ok(restored) => {
                table.zones = restored.zones;
                table.health = restored.health;
            }
            Err(err) => warn!("table: {}; starting from an empty table", err),
        }
        table
    }

    /// Like `from_json`, but reports why the document was rejected.
    pub fn try_from_json(json: &str, starting_health: i32) -> Result<Self, RestoreError> {
        let restored = snapshot::deserialize(json)?;
        let mut table = Self::new(starting_health);
        table.zones = restored.zones;
        table.health = restored.health;
        Ok(table)
    }

    // === Read access ===

    #[must_use]
    pub fn zones(&self) -> &ZoneStore {
        &self.zones
    }

    #[must_use]
    pub fn health(&self) -> &PlayerMap<i32> {
        &self.health
    }

    #[must_use]
    pub fn life(&self, player: PlayerId) -> i32 {
        self.health[player]
    }

    #[must_use]
    pub fn stats(&self) -> &CardStatsTable {
        &self.stats
    }

    #[must_use]
    pub fn starting_health(&self) -> i32 {
        self.starting_health
    }

    /// Power/toughness to display for a card.
    #[must_use]
    pub fn effective_stats(&self, card: &Card) -> Option<CardStats> {
        self.stats.effective(card)
    }

    // === Zone mutations ===

    /// Put a card into a zone, recording its printed stats.
    pub fn add_card(&mut self, card: Card, zone: PlayerId) -> CardPos {
        self.stats.seed_from(&card);
        self.zones.add_card(card, zone)
    }

    /// Remove the card at `pos`. Its stat override is kept.
    pub fn remove_card(&mut self, pos: CardPos) -> Result<Card, TableError> {
        self.zones.remove_card(pos)
    }

    /// Move the first copy of `card` in `from` to `to`.
    pub fn move_card(&mut self, card: &Card, from: PlayerId, to: PlayerId) -> Result<CardPos, TableError> {
        self.zones.move_card(card, from, to)
    }

    /// Move the card at `pos` to `to`.
    pub fn move_card_at(&mut self, pos: CardPos, to: PlayerId) -> Result<CardPos, TableError> {
        self.zones.move_card_at(pos, to)
    }

    // === Combat ===

    pub fn attack(&mut self, pos: CardPos) -> Result<(), TableError> {
        combat::declare_attack(&mut self.zones, pos)
    }

    pub fn activate_ability(&mut self, pos: CardPos) -> Result<(), TableError> {
        combat::activate_ability(&mut self.zones, pos)
    }

    /// Block the attacker at `target_index` in the opponent's zone.
    pub fn block(&mut self, blocker: CardPos, target_index: usize) -> Result<(), TableError> {
        let target = CardPos::new(blocker.zone.opponent(), target_index);
        combat::declare_block(&mut self.zones, blocker, target)
    }

    pub fn untap(&mut self, pos: CardPos) -> Result<(), TableError> {
        combat::untap(&mut self.zones, pos)
    }

    /// Attackers `blocker` could block, by index in the opponent's zone.
    pub fn block_targets(&self, blocker: CardPos) -> Result<Vec<(usize, &Card)>, TableError> {
        combat::block_targets(&self.zones, blocker)
    }

    pub fn legal_actions(&self, pos: CardPos) -> Result<SmallVec<[CombatAction; 4]>, TableError> {
        combat::legal_actions(&self.zones, pos)
    }

    // === Life and stats ===

    /// Set a life total. Any integer is stored as given.
    pub fn set_health(&mut self, player: PlayerId, value: i32) {
        self.health[player] = value;
    }

    /// Override power/toughness for every copy of `card_id`.
    pub fn set_stats(&mut self, card_id: impl Into<String>, stats: CardStats) {
        self.stats.set(card_id, stats);
    }

    /// Empty both zones and reset life totals. Stat overrides survive.
    pub fn clear(&mut self) {
        self.zones.clear();
        self.health = PlayerMap::with_value(self.starting_health);
    }

    // === Actions ===

    /// Apply one user action.
    pub fn apply(&mut self, action: &TableAction) -> Result<(), TableError> {
        match action {
            TableAction::AddCard { card, zone } => {
                self.add_card(card.clone(), *zone);
            }
            TableAction::RemoveCard { pos } => {
                self.remove_card(*pos)?;
            }
            TableAction::MoveCard { card, from, to } => {
                self.move_card(card, *from, *to)?;
            }
            TableAction::MoveCardAt { pos, to } => {
                self.move_card_at(*pos, *to)?;
            }
            TableAction::Attack { pos } => self.attack(*pos)?,
            TableAction::ActivateAbility { pos } => self.activate_ability(*pos)?,
            TableAction::Block { blocker, target_index } => self.block(*blocker, *target_index)?,
            TableAction::Untap { pos } => self.untap(*pos)?,
            TableAction::SetHealth { player, value } => self.set_health(*player, *value),
            TableAction::SetStats { card_id, stats } => self.set_stats(card_id.clone(), *stats),
            TableAction::ClearTable => self.clear(),
        }
        Ok(())
    }

    // === Snapshots and rendering ===

    /// Capture zones, flags, blocks and life totals.
    #[must_use]
    pub fn to_document(&self) -> TableDocument {
        snapshot::serialize(&self.zones, &self.health)
    }

    /// Replace zones and life totals with a document's. Stat overrides are
    /// left alone. Returns how many inconsistencies were repaired.
    pub fn restore_document(&mut self, doc: &TableDocument) -> usize {
        let restored = snapshot::restore(doc);
        self.zones = restored.zones;
        self.health = restored.health;
        restored.repairs
    }

    /// Replace the stat overrides wholesale.
    pub fn restore_stats(&mut self, stats: CardStatsTable) {
        self.stats = stats;
    }

    /// Match summary text.
    #[must_use]
    pub fn summary(&self) -> String {
        summary::generate_summary(&self.health, &self.zones, &self.stats)
    }

    /// "Card States" panel text.
    #[must_use]
    pub fn card_states(&self) -> String {
        summary::render_card_states(&self.zones, &self.stats)
    }
}
