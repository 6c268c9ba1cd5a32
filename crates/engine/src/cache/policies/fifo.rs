//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest block in a set, regardless of how recently
//! it was accessed. Age is read from the installation stamp, which is written
//! exactly once when a block is installed on a miss and never refreshed on a
//! hit.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1) (no-op)
//!   - `victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(1) - all state lives on the blocks
//! - **Best Case:** Streaming accesses where all blocks have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict hot blocks)

use super::{CacheBlock, ReplacementPolicy};

/// FIFO Policy. Stateless: age is read from block installation stamps.
#[derive(Clone, Copy, Debug, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Hits do not disturb insertion order.
    fn on_hit(&mut self, _block: &mut CacheBlock, _now: u64) {}

    /// Returns the way with the smallest installation stamp.
    ///
    /// Ties fall to the lowest way index.
    fn victim(&mut self, set: &[CacheBlock]) -> usize {
        set.iter()
            .enumerate()
            .min_by_key(|(_, block)| block.insertion_time)
            .map_or(0, |(way, _)| way)
    }
}
