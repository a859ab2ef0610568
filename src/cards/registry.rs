//! Card registry: the external card database seen from the engine.
//!
//! The engine never talks to a card database directly. Hosts implement
//! `CardRegistry` for whatever backs their search box and wrap it in a
//! `CachedRegistry`, which memoizes results and turns lookup failures into
//! empty result lists.
//!
//! Searches are the only cancellable operation at the table. A
//! `SearchCoordinator` hands out a `SearchToken` per query; starting a new
//! query invalidates every older token, so results that arrive late for a
//! superseded keystroke are dropped instead of shown.

use std::collections::VecDeque;

use log::warn;
use rustc_hash::FxHashMap;

use super::card::Card;

/// Errors a registry backend can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The backend could not be reached.
    Unavailable(String),
    /// The backend answered with something that is not a card list.
    Malformed(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Unavailable(reason) => write!(f, "Card registry unavailable: {}", reason),
            RegistryError::Malformed(reason) => write!(f, "Malformed registry response: {}", reason),
        }
    }
}

impl std::error::Error for RegistryError {}

/// A source of card records.
///
/// `advanced` selects full query syntax instead of name autocompletion.
/// Returned cards must carry integer-parseable `power`/`toughness` or none,
/// and a missing `oracle_text` means the card has no activatable ability.
pub trait CardRegistry {
    fn search(&mut self, query: &str, advanced: bool) -> Result<Vec<Card>, RegistryError>;
}

/// Memoizing wrapper around a registry backend.
///
/// ```
/// use ccg_tabletop::cards::{Card, CachedRegistry, CardRegistry, RegistryError};
///
/// struct Fixed;
/// impl CardRegistry for Fixed {
///     fn search(&mut self, query: &str, _advanced: bool) -> Result<Vec<Card>, RegistryError> {
///         Ok(vec![Card::new("1", query)])
///     }
/// }
///
/// let mut registry = CachedRegistry::new(Fixed);
/// assert_eq!(registry.lookup("Bear", false)[0].name, "Bear");
/// assert!(registry.lookup("   ", false).is_empty());
/// ```
#[derive(Debug)]
pub struct CachedRegistry<R> {
    inner: R,
    cache: FxHashMap<(String, bool), Vec<Card>>,
    /// Insertion order, oldest first, for eviction.
    order: VecDeque<(String, bool)>,
    capacity: Option<usize>,
}

impl<R: CardRegistry> CachedRegistry<R> {
    /// Wrap a backend with an unbounded cache.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: FxHashMap::default(),
            order: VecDeque::new(),
            capacity: None,
        }
    }

    /// Bound the cache to `capacity` queries, evicting the oldest first.
    #[must_use]
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self.evict();
        self
    }

    /// Look up cards for a query.
    ///
    /// Blank queries return nothing without touching the backend. Backend
    /// failures are logged and degrade to an empty list; they are not cached.
    pub fn lookup(&mut self, query: &str, advanced: bool) -> Vec<Card> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let key = (query.to_string(), advanced);
        if let Some(cards) = self.cache.get(&key) {
            return cards.clone();
        }

        match self.inner.search(query, advanced) {
            Ok(cards) => {
                self.insert(key, cards.clone());
                cards
            }
            Err(err) => {
                warn!("registry: search for {:?} failed: {}", query, err);
                Vec::new()
            }
        }
    }

    /// Whether a query's results are cached.
    #[must_use]
    pub fn is_cached(&self, query: &str, advanced: bool) -> bool {
        self.cache.contains_key(&(query.trim().to_string(), advanced))
    }

    /// Number of cached queries.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached result.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.order.clear();
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn insert(&mut self, key: (String, bool), cards: Vec<Card>) {
        if self.cache.insert(key.clone(), cards).is_none() {
            self.order.push_back(key);
        }
        self.evict();
    }

    fn evict(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.cache.len() > capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.cache.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

/// Handle for one in-flight search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchToken {
    generation: u64,
    query: String,
    advanced: bool,
}

impl SearchToken {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn advanced(&self) -> bool {
        self.advanced
    }
}

/// Issues search tokens and tells stale ones apart from the current one.
#[derive(Clone, Debug, Default)]
pub struct SearchCoordinator {
    generation: u64,
}

impl SearchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search, invalidating every earlier token.
    ///
    /// Returns `None` for a blank query: the caller should clear its results.
    pub fn begin(&mut self, query: &str, advanced: bool) -> Option<SearchToken> {
        self.generation += 1;
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(SearchToken {
            generation: self.generation,
            query: query.to_string(),
            advanced,
        })
    }

    /// Invalidate the pending search, if any.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Whether `token` belongs to the most recent search.
    #[must_use]
    pub fn is_current(&self, token: &SearchToken) -> bool {
        token.generation == self.generation
    }

    /// Run the search for `token`.
    ///
    /// Returns `None` when the token has been superseded, either before the
    /// lookup starts or by the time it is delivered.
    pub fn resolve<R: CardRegistry>(
        &self,
        token: &SearchToken,
        registry: &mut CachedRegistry<R>,
    ) -> Option<Vec<Card>> {
        if !self.is_current(token) {
            return None;
        }
        let cards = registry.lookup(&token.query, token.advanced);
        self.is_current(token).then_some(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that counts calls and can be told to fail.
    #[derive(Default)]
    struct CountingRegistry {
        calls: usize,
        fail: bool,
    }

    impl CardRegistry for CountingRegistry {
        fn search(&mut self, query: &str, advanced: bool) -> Result<Vec<Card>, RegistryError> {
            self.calls += 1;
            if self.fail {
                return Err(RegistryError::Unavailable("offline".to_string()));
            }
            let id = if advanced { "adv" } else { "name" };
            Ok(vec![Card::new(id, query)])
        }
    }

    #[test]
    fn test_cache_hits_skip_backend() {
        let mut registry = CachedRegistry::new(CountingRegistry::default());

        registry.lookup("Bear", false);
        registry.lookup("Bear", false);
        registry.lookup(" Bear ", false);

        assert_eq!(registry.inner().calls, 1);
        assert!(registry.is_cached("Bear", false));
    }

    #[test]
    fn test_advanced_is_separate_cache_entry() {
        let mut registry = CachedRegistry::new(CountingRegistry::default());

        let plain = registry.lookup("Bear", false);
        let advanced = registry.lookup("Bear", true);

        assert_eq!(plain[0].id, "name");
        assert_eq!(advanced[0].id, "adv");
        assert_eq!(registry.inner().calls, 2);
    }

    #[test]
    fn test_failure_degrades_to_empty() {
        let mut registry = CachedRegistry::new(CountingRegistry { calls: 0, fail: true });

        assert!(registry.lookup("Bear", false).is_empty());
        assert!(!registry.is_cached("Bear", false));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut registry =
            CachedRegistry::new(CountingRegistry::default()).with_capacity_limit(2);

        registry.lookup("a", false);
        registry.lookup("b", false);
        registry.lookup("c", false);

        assert_eq!(registry.cached_len(), 2);
        assert!(!registry.is_cached("a", false));
        assert!(registry.is_cached("c", false));
    }

    #[test]
    fn test_newer_search_supersedes_older() {
        let mut coordinator = SearchCoordinator::new();
        let mut registry = CachedRegistry::new(CountingRegistry::default());

        let first = coordinator.begin("Gri", false).unwrap();
        let second = coordinator.begin("Griz", false).unwrap();

        assert!(!coordinator.is_current(&first));
        assert_eq!(coordinator.resolve(&first, &mut registry), None);
        assert_eq!(registry.inner().calls, 0);

        let cards = coordinator.resolve(&second, &mut registry).unwrap();
        assert_eq!(cards[0].name, "Griz");
    }

    #[test]
    fn test_blank_query_and_cancel() {
        let mut coordinator = SearchCoordinator::new();

        let token = coordinator.begin("Bolt", false).unwrap();
        assert!(coordinator.begin("  ", false).is_none());
        assert!(!coordinator.is_current(&token));

        let token = coordinator.begin("Bolt", false).unwrap();
        coordinator.cancel();
        assert!(!coordinator.is_current(&token));
    }
}
