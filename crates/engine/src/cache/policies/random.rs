//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen way. The random source is an
//! explicitly seeded generator owned by the policy, never a process-wide
//! one, so a fixed seed reproduces the exact eviction sequence.

use super::{CacheBlock, ReplacementPolicy};

/// Random Policy state.
pub struct RandomPolicy {
    /// Seed the generator was built from; reused by `reset`.
    seed: u64,
    /// Owned random source.
    rng: fastrand::Rng,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the owned random source.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Access patterns do not affect random replacement.
    fn on_hit(&mut self, _block: &mut CacheBlock, _now: u64) {}

    /// Returns a uniformly chosen way index.
    fn victim(&mut self, set: &[CacheBlock]) -> usize {
        self.rng.usize(0..set.len())
    }

    /// Reseeds the generator so a reset cache replays identically.
    fn reset(&mut self) {
        self.rng = fastrand::Rng::with_seed(self.seed);
    }
}

impl core::fmt::Debug for RandomPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RandomPolicy")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
