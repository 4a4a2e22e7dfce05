//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Policies draw from their own stream, so adding a
//!   random policy never shifts the grid layout for a given seed
//!
//! ```
//! use rust_gridworld::core::WorldRng;
//!
//! let mut a = WorldRng::new(42);
//! let mut b = WorldRng::new(42);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//!
//! // Different context, different stream
//! let mut grid = a.for_context("grid");
//! let mut policy = a.for_context("policy");
//! let g: Vec<_> = (0..8).map(|_| grid.gen_range_usize(0..1000)).collect();
//! let p: Vec<_> = (0..8).map(|_| policy.gen_range_usize(0..1000)).collect();
//! assert_ne!(g, p);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct WorldRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl WorldRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Draw an index from the discrete distribution described by `weights`.
    ///
    /// Weights do not need to sum to 1.0. Returns `None` if weights are
    /// empty, contain a negative or non-finite value, or sum to zero.
    /// Zero-weight entries are never chosen.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() || weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f64>() * total;

        for (i, &weight) in weights.iter().enumerate() {
            if weight == 0.0 {
                continue;
            }
            threshold -= weight;
            if threshold < 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case - return last non-zero weight
        weights.iter().rposition(|&w| w > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = WorldRng::new(42);
        let mut rng2 = WorldRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = WorldRng::new(1);
        let mut rng2 = WorldRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut ctx1 = WorldRng::new(42).for_context("policy");
        let mut ctx2 = WorldRng::new(42).for_context("policy");
        let mut base = WorldRng::new(42);

        let seq1: Vec<_> = (0..10).map(|_| ctx1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.gen_range_usize(0..1000)).collect();
        let base_seq: Vec<_> = (0..10).map(|_| base.gen_range_usize(0..1000)).collect();

        assert_eq!(seq1, seq2);
        assert_ne!(seq1, base_seq);
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = WorldRng::new(42);

        let weights = [100.0, 0.0, 0.0];
        for _ in 0..20 {
            assert_eq!(rng.choose_weighted(&weights), Some(0));
        }

        let weights = [0.0, 0.0, 3.0];
        for _ in 0..20 {
            assert_eq!(rng.choose_weighted(&weights), Some(2));
        }

        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0.0, 0.0]), None);
        assert_eq!(rng.choose_weighted(&[1.0, -1.0]), None);
        assert_eq!(rng.choose_weighted(&[f64::NAN]), None);
    }

    #[test]
    fn test_choose_weighted_covers_all_positive_entries() {
        let mut rng = WorldRng::new(7);
        let mut seen = [false; 3];
        for _ in 0..500 {
            if let Some(i) = rng.choose_weighted(&[1.0, 2.0, 1.0]) {
                seen[i] = true;
            }
        }
        assert_eq!(seen, [true, true, true]);
    }
}
