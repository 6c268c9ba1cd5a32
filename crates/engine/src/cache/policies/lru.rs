//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has not been accessed for the longest
//! time, read directly from the access stamps the cache maintains on every
//! block. Stamps come from a monotonic per-cache counter, so the smallest
//! stamp is the coldest block.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(1) - all state lives on the blocks
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{CacheBlock, ReplacementPolicy};

/// LRU Policy. Stateless: recency is read from block access stamps.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Refreshes the access stamp of the hit block.
    fn on_hit(&mut self, block: &mut CacheBlock, now: u64) {
        block.last_access_time = now;
    }

    /// Returns the way with the smallest access stamp.
    ///
    /// Ties fall to the lowest way index (the scan keeps the first minimum).
    fn victim(&mut self, set: &[CacheBlock]) -> usize {
        set.iter()
            .enumerate()
            .min_by_key(|(_, block)| block.last_access_time)
            .map_or(0, |(way, _)| way)
    }
}
