//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable set-associative cache with per-block
//! state tracking. It provides the following:
//! 1. **Storage:** Valid/dirty/tag state plus recency, insertion, and frequency
//!    metadata for every block, stored contiguously per set.
//! 2. **Lookup:** Hit/miss classification with eviction and writeback accounting.
//! 3. **Policies:** Victim selection under LRU, FIFO, LFU, or seeded Random.
//! 4. **Observation:** Deep-copy snapshots of sets and statistics for
//!    visualization and testing.

/// Cache replacement policy implementations (LRU, FIFO, LFU, Random).
pub mod policies;

use serde::{Deserialize, Serialize};

use self::policies::{FifoPolicy, LfuPolicy, LruPolicy, RandomPolicy, ReplacementPolicy};
use crate::common::addr::Geometry;
use crate::common::constants::DEFAULT_SEED;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, ReplacementPolicy as PolicyKind, WritePolicy};

/// Identifies which level of the hierarchy produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheLevel {
    /// First-level cache.
    L1,
    /// Second-level cache.
    L2,
}

/// One cache block: storage state plus replacement metadata.
///
/// A fresh block has all flags false and all counters zero. Blocks are reused
/// in place; installation rewrites the fields of the victim without
/// reallocating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheBlock {
    /// Whether the block holds a live line.
    pub valid: bool,
    /// Whether the block has been written under a write-back policy.
    pub dirty: bool,
    /// Tag of the cached address.
    pub tag: u32,
    /// Stamp of the most recent access (from the cache's monotonic counter).
    pub last_access_time: u64,
    /// Stamp written when the block was installed; never refreshed on hits.
    pub insertion_time: u64,
    /// Number of accesses to the block since installation (starts at 1).
    pub access_count: u64,
}

/// Aggregate hit/miss/writeback counters for one cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups that found a valid block with a matching tag.
    pub hits: u64,
    /// Lookups that missed and installed a block.
    pub misses: u64,
    /// Total lookups (`hits + misses`).
    pub total_accesses: u64,
    /// Valid-and-dirty blocks displaced so far.
    pub writebacks: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, or 0.0 before any access.
    ///
    /// Computed at read time so it can never go stale between counter updates.
    #[inline]
    pub fn hit_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_accesses as f64
        }
    }

    /// Fraction of lookups that missed, or 0.0 before any access.
    #[inline]
    pub fn miss_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.total_accesses as f64
        }
    }
}

/// Outcome of a single cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessResult {
    /// Whether the lookup found a valid block with a matching tag.
    pub hit: bool,
    /// Set the address mapped to.
    pub set_index: u32,
    /// Way that was hit, or the way the new block was installed into.
    pub way_index: u32,
    /// Tag of the accessed address.
    pub tag: u32,
    /// Whether a valid block was displaced to make room.
    pub evicted: bool,
    /// Tag of the displaced block, when one was displaced.
    pub evicted_tag: Option<u32>,
    /// Level that produced this result.
    pub level: CacheLevel,
    /// Whether the access fell through this level all the way to memory.
    pub memory_accessed: bool,
}

/// Configurable set-associative cache.
///
/// Blocks are stored as one contiguous array; the blocks of set `s` occupy
/// `[s * ways, (s + 1) * ways)`. An internal monotonic counter stamps every
/// access, which is all the state LRU/FIFO/LFU need.
pub struct Cache {
    config: CacheConfig,
    geometry: Geometry,
    level: CacheLevel,
    blocks: Vec<CacheBlock>,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
    stats: CacheStats,
    clock: u64,
}

impl Cache {
    /// Creates a cache from a validated configuration.
    ///
    /// The random policy (when selected) uses the engine's fixed default
    /// seed, so unseeded construction is still deterministic.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache shape, replacement policy, and write policy.
    ///
    /// # Returns
    ///
    /// The cache, or the first violated geometry invariant.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        Self::with_level(config, CacheLevel::L1, DEFAULT_SEED)
    }

    /// Creates a cache whose random source starts from `seed`.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache shape, replacement policy, and write policy.
    /// * `seed` - Seed for the random replacement policy.
    pub fn with_seed(config: CacheConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_level(config, CacheLevel::L1, seed)
    }

    /// Creates a cache stamped with an explicit hierarchy level.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache shape, replacement policy, and write policy.
    /// * `level` - Level recorded in every `AccessResult` this cache produces.
    /// * `seed` - Seed for the random replacement policy.
    ///
    /// # Returns
    ///
    /// The cache, or the first violated geometry invariant.
    pub fn with_level(
        config: CacheConfig,
        level: CacheLevel,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        let policy: Box<dyn ReplacementPolicy + Send + Sync> = match config.policy {
            PolicyKind::Lru => Box::new(LruPolicy),
            PolicyKind::Fifo => Box::new(FifoPolicy),
            PolicyKind::Lfu => Box::new(LfuPolicy),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        };
        Ok(Self {
            blocks: vec![CacheBlock::default(); config.num_blocks() as usize],
            config,
            geometry,
            level,
            policy,
            stats: CacheStats::default(),
            clock: 0,
        })
    }

    /// Performs one lookup, updating blocks, metadata, and statistics.
    ///
    /// On a hit the block's metadata is updated per the replacement policy,
    /// and a write dirties the block under write-back. On a miss the first
    /// invalid way (left to right) is filled; with no free way the policy
    /// picks a victim, and displacing a valid dirty block counts one
    /// writeback. The installed block's access count starts at 1 for the
    /// installing access itself.
    ///
    /// This operation is total: it never fails and never allocates.
    ///
    /// # Arguments
    ///
    /// * `address` - 32-bit physical address.
    /// * `is_write` - `true` for a store.
    ///
    /// # Returns
    ///
    /// The `AccessResult` describing the lookup.
    pub fn access(&mut self, address: u32, is_write: bool) -> AccessResult {
        self.clock += 1;
        self.stats.total_accesses += 1;

        let parts = self.geometry.decompose(address);
        let ways = self.geometry.ways as usize;
        let base = parts.index as usize * ways;
        let write_back = self.config.write_policy == WritePolicy::WriteBack;

        for way in 0..ways {
            let block = &self.blocks[base + way];
            if block.valid && block.tag == parts.tag {
                self.stats.hits += 1;
                self.policy.on_hit(&mut self.blocks[base + way], self.clock);
                if is_write && write_back {
                    self.blocks[base + way].dirty = true;
                }
                return AccessResult {
                    hit: true,
                    set_index: parts.index,
                    way_index: way as u32,
                    tag: parts.tag,
                    evicted: false,
                    evicted_tag: None,
                    level: self.level,
                    memory_accessed: false,
                };
            }
        }

        self.stats.misses += 1;

        let set = &self.blocks[base..base + ways];
        let way = set
            .iter()
            .position(|block| !block.valid)
            .unwrap_or_else(|| self.policy.victim(set));

        let block = &mut self.blocks[base + way];
        let evicted = block.valid;
        let evicted_tag = if evicted { Some(block.tag) } else { None };
        if block.valid && block.dirty {
            self.stats.writebacks += 1;
        }

        *block = CacheBlock {
            valid: true,
            dirty: is_write && write_back,
            tag: parts.tag,
            last_access_time: self.clock,
            insertion_time: self.clock,
            access_count: 1,
        };

        AccessResult {
            hit: false,
            set_index: parts.index,
            way_index: way as u32,
            tag: parts.tag,
            evicted,
            evicted_tag,
            level: self.level,
            memory_accessed: false,
        }
    }

    /// Returns a snapshot of the current statistics.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Returns a deep copy of every set, in set order.
    ///
    /// The caller owns the copy; mutating it cannot affect the cache.
    pub fn sets(&self) -> Vec<Vec<CacheBlock>> {
        self.blocks
            .chunks(self.geometry.ways as usize)
            .map(<[CacheBlock]>::to_vec)
            .collect()
    }

    /// Restores the construction-time state.
    ///
    /// Zeroes the access counter and statistics and returns every block to
    /// the fresh state. Accesses after a reset behave identically to a newly
    /// constructed cache.
    pub fn reset(&mut self) {
        self.clock = 0;
        self.stats = CacheStats::default();
        self.blocks.fill(CacheBlock::default());
        self.policy.reset();
    }

    /// Average memory access time given a hit time and miss penalty.
    ///
    /// `hit_time + (1 - hit_rate) * miss_penalty`, using current statistics.
    #[inline]
    pub fn calculate_amat(&self, hit_time: f64, miss_penalty: f64) -> f64 {
        crate::amat::single_level(hit_time, self.stats.hit_rate(), miss_penalty)
    }

    /// The configuration this cache was built from.
    #[inline]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The derived address geometry.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The hierarchy level stamped on this cache's results.
    #[inline]
    pub const fn level(&self) -> CacheLevel {
        self.level
    }
}

impl core::fmt::Debug for Cache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cache")
            .field("config", &self.config)
            .field("level", &self.level)
            .field("stats", &self.stats)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
