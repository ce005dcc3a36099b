//! Seeded random source for sequence generation.
//!
//! Implements PCG (Permuted Congruential Generator). A configured seed makes
//! every generated sequence reproducible; without one the master seed is
//! drawn from OS entropy and kept so the run can be replayed from the log.

use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::error::{SortError, SortResult};

/// Reproducible generator of bounded integer sequences.
#[derive(Debug, Clone)]
pub struct SeqRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SeqRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Draw one integer uniformly from `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `min > max`.
    pub fn gen_value(&mut self, min: i64, max: i64) -> SortResult<i64> {
        if min > max {
            return Err(SortError::invalid_input(format!(
                "value range is empty: min {min} > max {max}"
            )));
        }
        Ok(self.rng.gen_range(min..=max))
    }

    /// Generate `length` integers drawn uniformly from `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `min > max`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortviz::engine::rng::SeqRng;
    ///
    /// let mut rng = SeqRng::new(42);
    /// let values = rng.sequence(50, 0, 100).unwrap();
    /// assert_eq!(values.len(), 50);
    /// assert!(values.iter().all(|v| (0..=100).contains(v)));
    /// ```
    pub fn sequence(&mut self, length: usize, min: i64, max: i64) -> SortResult<Vec<i64>> {
        (0..length).map(|_| self.gen_value(min, max)).collect()
    }
}
