//! Cache Hierarchy Orchestrator.
//!
//! This module routes each access through L1, then L2, then main memory,
//! with independent lookups at every level. It provides the following:
//! 1. **Routing:** Enabled levels are visited in order; the first hit stops
//!    the walk, and a full miss falls through to memory.
//! 2. **Latency:** Every visited level contributes its fixed hit time even
//!    when it misses; memory adds its burst-corrected latency.
//! 3. **Accounting:** Combined hit/miss statistics, cumulative cycles, and
//!    the per-access data path.
//!
//! There is no inclusion or exclusion enforcement: a block installed in L1
//! need not live in L2 and vice versa.

use serde::{Serialize, Serializer};

use crate::cache::{AccessResult, Cache, CacheLevel, CacheStats};
use crate::common::constants::{
    DEFAULT_SEED, DEFAULT_TRANSFER_BLOCK_BYTES, L1_HIT_CYCLES, L2_HIT_CYCLES,
};
use crate::common::error::ConfigError;
use crate::config::{HierarchyConfig, MemoryConfig};
use crate::memory::{MainMemory, MemoryAccessResult, MemoryRegion, MemoryStats};

/// One stop on an access's path through the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PathStep {
    /// The access visited L1.
    L1,
    /// The access visited L2.
    L2,
    /// The access reached main memory.
    Memory,
}

/// The ordered stops of one access.
///
/// At most three stops exist (L1, L2, memory), so the path is a fixed-size
/// array plus a length rather than a heap-allocated list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataPath {
    steps: [PathStep; 3],
    len: usize,
}

impl DataPath {
    /// Creates an empty path.
    #[inline]
    const fn new() -> Self {
        Self {
            steps: [PathStep::L1; 3],
            len: 0,
        }
    }

    /// Appends a stop. The walk visits at most three, so this cannot overflow.
    #[inline]
    fn push(&mut self, step: PathStep) {
        self.steps[self.len] = step;
        self.len += 1;
    }

    /// The stops in visit order.
    #[inline]
    pub fn as_slice(&self) -> &[PathStep] {
        &self.steps[..self.len]
    }

    /// Number of stops on the path.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the path is empty (never true for a served access).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Serialize for DataPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

/// Full outcome of one access routed through the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HierarchyAccessResult {
    /// L1 lookup result, when L1 is enabled.
    pub l1: Option<AccessResult>,
    /// L2 lookup result, when L2 was consulted.
    pub l2: Option<AccessResult>,
    /// Memory access result, when the access fell through every level.
    pub memory: Option<MemoryAccessResult>,
    /// Total cycles: hit times of every visited level plus memory latency.
    pub total_latency_cycles: u64,
    /// Levels visited, in order.
    pub data_path: DataPath,
}

/// Two-level cache hierarchy in front of a main memory model.
pub struct Hierarchy {
    config: HierarchyConfig,
    l1: Option<Cache>,
    l2: Option<Cache>,
    memory: MainMemory,
    combined: CacheStats,
    total_cycles: u64,
}

impl Hierarchy {
    /// Builds a hierarchy with the engine's fixed default seed.
    ///
    /// # Arguments
    ///
    /// * `config` - Level shapes and enable flags.
    /// * `memory` - Main memory model parameters.
    ///
    /// # Returns
    ///
    /// The hierarchy, or the first violated geometry invariant among the
    /// enabled levels.
    pub fn new(config: HierarchyConfig, memory: MemoryConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, memory, DEFAULT_SEED)
    }

    /// Builds a hierarchy whose random sources start from `seed`.
    ///
    /// Each level derives its own stream from the base seed, so two levels
    /// with random replacement never share eviction sequences.
    pub fn with_seed(
        config: HierarchyConfig,
        memory: MemoryConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let l1 = if config.l1_enabled {
            Some(Cache::with_level(config.l1, CacheLevel::L1, seed)?)
        } else {
            None
        };
        let l2 = if config.l2_enabled {
            Some(Cache::with_level(
                config.l2,
                CacheLevel::L2,
                seed.wrapping_add(1),
            )?)
        } else {
            None
        };
        Ok(Self {
            config,
            l1,
            l2,
            memory: MainMemory::new(memory),
            combined: CacheStats::default(),
            total_cycles: 0,
        })
    }

    /// Routes one access through the enabled levels and, on a full miss,
    /// main memory.
    ///
    /// A combined hit is recorded when any enabled level hits; a combined
    /// miss is recorded when the access reaches memory. With both levels
    /// disabled every access is a direct memory access.
    ///
    /// # Arguments
    ///
    /// * `address` - 32-bit physical address.
    /// * `is_write` - `true` for a store.
    ///
    /// # Returns
    ///
    /// Per-level results, memory result, total latency, and the data path.
    pub fn access(&mut self, address: u32, is_write: bool) -> HierarchyAccessResult {
        let mut path = DataPath::new();
        let mut latency = 0u64;
        let mut l1_result = None;
        let mut l2_result = None;
        let mut memory_result = None;

        self.combined.total_accesses += 1;

        let mut hit = false;
        if let Some(l1) = self.l1.as_mut() {
            path.push(PathStep::L1);
            latency += L1_HIT_CYCLES;
            let result = l1.access(address, is_write);
            hit = result.hit;
            l1_result = Some(result);
        }

        if !hit {
            if let Some(l2) = self.l2.as_mut() {
                path.push(PathStep::L2);
                latency += L2_HIT_CYCLES;
                let result = l2.access(address, is_write);
                hit = result.hit;
                l2_result = Some(result);
            }
        }

        if hit {
            self.combined.hits += 1;
        } else {
            path.push(PathStep::Memory);
            let block_bytes = self.transfer_block_bytes();
            let result = self.memory.access(address, is_write, block_bytes);
            latency += result.latency_cycles;
            memory_result = Some(result);
            self.combined.misses += 1;

            if let Some(result) = l1_result.as_mut() {
                result.memory_accessed = true;
            }
            if let Some(result) = l2_result.as_mut() {
                result.memory_accessed = true;
            }
        }

        self.total_cycles += latency;

        HierarchyAccessResult {
            l1: l1_result,
            l2: l2_result,
            memory: memory_result,
            total_latency_cycles: latency,
            data_path: path,
        }
    }

    /// Block size governing memory transfers: L1's when enabled, else L2's,
    /// else the fallback transfer size.
    fn transfer_block_bytes(&self) -> u32 {
        self.l1
            .as_ref()
            .or(self.l2.as_ref())
            .map_or(DEFAULT_TRANSFER_BLOCK_BYTES, |cache| {
                cache.config().block_bytes
            })
    }

    /// Average memory access time over the hierarchy's current statistics.
    ///
    /// A level with zero accesses contributes a miss rate of one. With no
    /// level enabled the AMAT is the memory penalty itself.
    ///
    /// # Arguments
    ///
    /// * `l1_hit_time` - L1 hit time in cycles.
    /// * `l2_hit_time` - L2 hit time in cycles.
    /// * `memory_penalty` - Miss penalty; defaults to the memory base latency.
    pub fn calculate_amat(
        &self,
        l1_hit_time: f64,
        l2_hit_time: f64,
        memory_penalty: Option<f64>,
    ) -> f64 {
        let penalty =
            memory_penalty.unwrap_or_else(|| self.memory.config().latency_cycles as f64);
        match (self.l1.as_ref(), self.l2.as_ref()) {
            (None, None) => penalty,
            (Some(l1), None) => {
                crate::amat::single_level(l1_hit_time, l1.stats().hit_rate(), penalty)
            }
            (None, Some(l2)) => {
                crate::amat::single_level(l2_hit_time, l2.stats().hit_rate(), penalty)
            }
            (Some(l1), Some(l2)) => crate::amat::two_level(
                l1_hit_time,
                l1.stats().hit_rate(),
                l2_hit_time,
                l2.stats().hit_rate(),
                penalty,
            ),
        }
    }

    /// The L1 cache, when enabled.
    #[inline]
    pub const fn l1(&self) -> Option<&Cache> {
        self.l1.as_ref()
    }

    /// The L2 cache, when enabled.
    #[inline]
    pub const fn l2(&self) -> Option<&Cache> {
        self.l2.as_ref()
    }

    /// Combined statistics across the enabled levels.
    ///
    /// Writebacks are the sum over levels; hits and misses count accesses,
    /// not level visits, so `hits + misses == total_accesses`.
    pub fn combined_stats(&self) -> CacheStats {
        let mut stats = self.combined;
        stats.writebacks = self.l1.as_ref().map_or(0, |cache| cache.stats().writebacks)
            + self.l2.as_ref().map_or(0, |cache| cache.stats().writebacks);
        stats
    }

    /// Snapshot of the memory device's aggregate figures.
    #[inline]
    pub fn memory_stats(&self) -> MemoryStats {
        self.memory.stats()
    }

    /// Deep copy of the memory heat-map regions.
    #[inline]
    pub fn memory_regions(&self) -> Vec<MemoryRegion> {
        self.memory.regions()
    }

    /// The main memory model.
    #[inline]
    pub const fn memory(&self) -> &MainMemory {
        &self.memory
    }

    /// Cumulative latency of every access routed so far.
    #[inline]
    pub const fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// The configuration this hierarchy was built from.
    #[inline]
    pub const fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Restores the construction-time state of every level and the memory.
    pub fn reset(&mut self) {
        if let Some(l1) = self.l1.as_mut() {
            l1.reset();
        }
        if let Some(l2) = self.l2.as_mut() {
            l2.reset();
        }
        self.memory.reset();
        self.combined = CacheStats::default();
        self.total_cycles = 0;
    }
}

impl core::fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hierarchy")
            .field("config", &self.config)
            .field("combined", &self.combined)
            .field("total_cycles", &self.total_cycles)
            .finish_non_exhaustive()
    }
}
