//! Least Frequently Used (LFU) Replacement Policy.
//!
//! This policy evicts the block with the smallest access count. Counts start
//! at one on installation (the installing access itself) and grow on every
//! hit, so long-lived hot blocks are protected even across bursts of
//! single-use traffic.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(1) - all state lives on the blocks
//! - **Best Case:** Stable hot sets with occasional cold scans
//! - **Worst Case:** Phase changes - stale counts pin formerly hot blocks

use super::{CacheBlock, ReplacementPolicy};

/// LFU Policy. Stateless: frequency is read from block access counts.
#[derive(Clone, Copy, Debug, Default)]
pub struct LfuPolicy;

impl ReplacementPolicy for LfuPolicy {
    /// Bumps the access count and refreshes the access stamp.
    fn on_hit(&mut self, block: &mut CacheBlock, now: u64) {
        block.access_count += 1;
        block.last_access_time = now;
    }

    /// Returns the way with the smallest access count.
    ///
    /// Ties fall to the smallest access stamp, then to the lowest way index.
    fn victim(&mut self, set: &[CacheBlock]) -> usize {
        set.iter()
            .enumerate()
            .min_by_key(|(_, block)| (block.access_count, block.last_access_time))
            .map_or(0, |(way, _)| way)
    }
}
