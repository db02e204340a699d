//! Random sources for constrained-random value generation.
//!
//! A [`CoveragePoint`](crate::CoveragePoint) draws through the
//! [`RandomSource`] trait: uniform draws from an interval or a value set, and
//! weighted draws over `(index, weight)` candidates. [`SeededRandom`] is the
//! default, reproducible implementation.
//!
//! # Example
//!
//! ```
//! use fcov::{RandomSource, Seed, SeededRandom};
//!
//! let mut rng = SeededRandom::new(Seed::from_u64(12345));
//! let v = rng.uniform(0, 9);
//! assert!((0..=9).contains(&v));
//! ```

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Deterministic seed for reproducible stimulus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a u64 value
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw seed value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Source of randomness used by value generation
pub trait RandomSource {
    /// Draw uniformly from the inclusive interval `[min, max]`
    ///
    /// Returns `min` when the interval is empty or a single point.
    fn uniform(&mut self, min: i64, max: i64) -> i64;

    /// Draw uniformly from an explicit value set
    fn choose(&mut self, values: &[i64]) -> Option<i64>;

    /// Draw one candidate index with probability proportional to its weight
    ///
    /// Candidates with weight 0 are never selected. Returns `None` when
    /// there is no candidate with a nonzero weight.
    fn weighted(&mut self, candidates: &[(usize, u64)]) -> Option<usize>;
}

/// Xoshiro256++ backed random source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Xoshiro256PlusPlus,
}

impl SeededRandom {
    /// Create a reproducible source from a seed
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed.value()),
        }
    }

    /// Create a source seeded from the operating system
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn choose(&mut self, values: &[i64]) -> Option<i64> {
        values.choose(&mut self.rng).copied()
    }

    fn weighted(&mut self, candidates: &[(usize, u64)]) -> Option<usize> {
        // WeightedIndex sums unchecked
        candidates
            .iter()
            .try_fold(0_u64, |total, &(_, weight)| total.checked_add(weight))?;
        let dist = WeightedIndex::new(candidates.iter().map(|&(_, weight)| weight)).ok()?;
        candidates
            .get(dist.sample(&mut self.rng))
            .map(|&(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_roundtrip() {
        assert_eq!(Seed::from_u64(7).value(), 7);
        assert_eq!(Seed::default().value(), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new(Seed::from_u64(99));
        let mut b = SeededRandom::new(Seed::from_u64(99));
        for _ in 0..100 {
            assert_eq!(a.uniform(-1000, 1000), b.uniform(-1000, 1000));
        }
    }

    #[test]
    fn test_uniform_stays_in_bounds() {
        let mut rng = SeededRandom::new(Seed::from_u64(1));
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let v = rng.uniform(3, 6);
            assert!((3..=6).contains(&v));
            seen_min |= v == 3;
            seen_max |= v == 6;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_uniform_degenerate_interval() {
        let mut rng = SeededRandom::new(Seed::from_u64(1));
        assert_eq!(rng.uniform(5, 5), 5);
        assert_eq!(rng.uniform(i64::MIN, i64::MIN), i64::MIN);
    }

    #[test]
    fn test_uniform_full_domain() {
        let mut rng = SeededRandom::new(Seed::from_u64(2));
        let _ = rng.uniform(i64::MIN, i64::MAX);
    }

    #[test]
    fn test_choose_from_set() {
        let mut rng = SeededRandom::new(Seed::from_u64(3));
        let set = [2, 4, 8];
        for _ in 0..100 {
            let v = rng.choose(&set);
            assert!(matches!(v, Some(2 | 4 | 8)));
        }
        assert_eq!(rng.choose(&[]), None);
    }

    #[test]
    fn test_weighted_skips_zero_weight() {
        let mut rng = SeededRandom::new(Seed::from_u64(4));
        let candidates = [(0, 0), (1, 5), (2, 0), (3, 1)];
        for _ in 0..500 {
            let idx = rng.weighted(&candidates);
            assert!(matches!(idx, Some(1 | 3)));
        }
    }

    #[test]
    fn test_weighted_all_zero_is_none() {
        let mut rng = SeededRandom::new(Seed::from_u64(5));
        assert_eq!(rng.weighted(&[(0, 0), (1, 0)]), None);
        assert_eq!(rng.weighted(&[]), None);
    }

    #[test]
    fn test_weighted_overflowing_total_is_none() {
        let mut rng = SeededRandom::new(Seed::from_u64(5));
        assert_eq!(rng.weighted(&[(0, u64::MAX), (1, u64::MAX)]), None);
        assert_eq!(rng.weighted(&[(0, u64::MAX), (1, 0)]), Some(0));
    }

    #[test]
    fn test_weighted_is_proportional() {
        let mut rng = SeededRandom::new(Seed::from_u64(6));
        let candidates = [(10, 1), (20, 3)];
        let heavy = (0..4000)
            .filter(|_| rng.weighted(&candidates) == Some(20))
            .count();
        // Expect ~3000; allow generous slack
        assert!((2700..3300).contains(&heavy), "heavy = {heavy}");
    }
}
