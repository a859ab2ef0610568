//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier for the two seats at the table.
//! Raw indices from the view layer go through `PlayerId::try_from`, which
//! rejects anything outside `{0, 1}` with `TableError::InvalidZone`.
//!
//! ## PlayerMap
//!
//! Fixed-arity per-player storage backed by `[T; 2]`. Serializes as a
//! two-element JSON array, so documents with any other arity fail to parse.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::TableError;

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier: `0` or `1`.
///
/// Each player owns exactly one zone, so a `PlayerId` doubles as a zone index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first player (zone 0).
    pub const FIRST: PlayerId = PlayerId(0);

    /// The second player (zone 1).
    pub const SECOND: PlayerId = PlayerId(1);

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    /// Iterate over both players in index order.
    ///
    /// ```
    /// use ccg_tabletop::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId::FIRST, PlayerId::SECOND].into_iter()
    }
}

impl TryFrom<usize> for PlayerId {
    type Error = TableError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PlayerId::FIRST),
            1 => Ok(PlayerId::SECOND),
            other => Err(TableError::InvalidZone(other)),
        }
    }
}

impl From<PlayerId> for usize {
    fn from(player: PlayerId) -> usize {
        player.index()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Seats are numbered from 1 in everything a person reads.
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ccg_tabletop::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i32> = PlayerMap::with_value(40);
/// life[PlayerId::SECOND] = 35;
///
/// assert_eq!(life[PlayerId::FIRST], 40);
/// assert_eq!(life[PlayerId::SECOND], 35);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Build from one value per player, in index order.
    pub fn from_pair(first: T, second: T) -> Self {
        Self { data: [first, second] }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all().zip(self.data.iter_mut())
    }

    /// Iterate over values in player order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Map each entry into a new PlayerMap.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|player| f(player, self.get(player)))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
        assert_eq!(format!("{}", PlayerId::FIRST), "Player 1");
    }

    #[test]
    fn test_player_id_try_from() {
        assert_eq!(PlayerId::try_from(0usize), Ok(PlayerId::FIRST));
        assert_eq!(PlayerId::try_from(1usize), Ok(PlayerId::SECOND));
        assert_eq!(PlayerId::try_from(2usize), Err(TableError::InvalidZone(2)));
    }

    #[test]
    fn test_player_id_serialization() {
        let json = serde_json::to_string(&PlayerId::SECOND).unwrap();
        assert_eq!(json, "1");
        assert!(serde_json::from_str::<PlayerId>("7").is_err());
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::FIRST], 0);
        assert_eq!(map[PlayerId::SECOND], 10);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(0);

        map[PlayerId::FIRST] = 10;
        map[PlayerId::SECOND] = 20;

        assert_eq!(map[PlayerId::FIRST], 10);
        assert_eq!(map[PlayerId::SECOND], 20);
    }

    #[test]
    fn test_player_map_iter() {
        let map = PlayerMap::from_pair(3, 4);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &3), (PlayerId::SECOND, &4)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map = PlayerMap::from_pair(40, 38);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[40,38]");

        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_player_map_rejects_wrong_arity() {
        assert!(serde_json::from_str::<PlayerMap<i32>>("[40]").is_err());
        assert!(serde_json::from_str::<PlayerMap<i32>>("[40,40,40]").is_err());
    }
}
