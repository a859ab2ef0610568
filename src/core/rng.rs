//! Random number generation for table naming.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical names (useful in tests)
//! - **Entropy fallback**: Unseeded tables draw a fresh seed from the OS
//!
//! ```
//! use ccg_tabletop::core::TableRng;
//!
//! let mut a = TableRng::new(7);
//! let mut b = TableRng::new(7);
//! assert_eq!(a.table_name(), b.table_name());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ADJECTIVES: [&str; 10] = [
    "Mighty", "Ancient", "Swift", "Cunning", "Arcane", "Wild", "Sacred", "Shadow", "Radiant",
    "Feral",
];

const NOUNS: [&str; 10] = [
    "Forest", "Dragon", "Knight", "Wizard", "Temple", "Phoenix", "Druid", "Goblin", "Angel",
    "Demon",
];

/// RNG used for generated snapshot names.
///
/// Uses ChaCha8 so that a configured seed reproduces the same sequence on
/// every platform.
#[derive(Clone, Debug)]
pub struct TableRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl TableRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seeded if `seed` is set, entropy otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The seed this RNG started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Pick an "Adjective Noun" name for a quick-saved table.
    pub fn table_name(&mut self) -> String {
        let adjective = ADJECTIVES[self.gen_range_usize(0..ADJECTIVES.len())];
        let noun = NOUNS[self.gen_range_usize(0..NOUNS.len())];
        format!("{} {}", adjective, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = TableRng::new(42);
        let mut rng2 = TableRng::new(42);

        for _ in 0..20 {
            assert_eq!(rng1.table_name(), rng2.table_name());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = TableRng::new(1);
        let mut rng2 = TableRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_table_name_shape() {
        let mut rng = TableRng::new(9);

        for _ in 0..50 {
            let name = rng.table_name();
            let (adjective, noun) = name.split_once(' ').unwrap();
            assert!(ADJECTIVES.contains(&adjective));
            assert!(NOUNS.contains(&noun));
        }
    }

    #[test]
    fn test_optional_seed() {
        assert_eq!(TableRng::from_optional_seed(Some(5)).seed(), 5);
    }
}
