//! Cache Replacement Policies.
//!
//! Implements the victim-selection algorithms for set-associative caches.
//!
//! Policies operate on per-block metadata (access stamps, installation stamps,
//! access counts) maintained by the owning cache, so victim selection is a
//! linear scan over the ways of one set. Associativity is small and bounded,
//! which keeps the scan cheap and the tie-break rules exact.
//!
//! A policy is consulted only when every way in the target set is valid; free
//! ways are always filled first, left to right.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.
//! - `Lfu`: Least Frequently Used.
//! - `Random`: Seeded random selection.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Frequently Used replacement policy.
pub mod lfu;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use super::CacheBlock;

/// Trait for cache replacement policies.
///
/// Defines the interface for recording hits and selecting victim ways.
pub trait ReplacementPolicy: Send + Sync {
    /// Updates block metadata when a lookup hits.
    ///
    /// # Arguments
    ///
    /// * `block` - The block that was hit.
    /// * `now` - The cache's access counter at the time of the hit.
    fn on_hit(&mut self, block: &mut CacheBlock, now: u64);

    /// Selects a victim way from a fully valid set.
    ///
    /// # Arguments
    ///
    /// * `set` - The blocks of the target set, in way order.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn victim(&mut self, set: &[CacheBlock]) -> usize;

    /// Restores the construction-time policy state.
    ///
    /// Most policies are stateless (all their inputs live on the blocks);
    /// the random policy reseeds its generator here.
    fn reset(&mut self) {}
}
