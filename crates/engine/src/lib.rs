//! Deterministic cache and main-memory hierarchy simulator.
//!
//! This crate implements the core engine of a configurable cache simulator with the following:
//! 1. **Cache:** Set-associative single-level caches with LRU/FIFO/LFU/Random
//!    replacement, write-back/write-through handling, and full per-block state.
//! 2. **Hierarchy:** L1 → L2 → memory routing with independent lookups,
//!    per-level latency accumulation, and combined statistics.
//! 3. **Memory:** A scalar-latency main-memory model with burst transfer
//!    costing, a sixteen-region heat map, and bandwidth accounting.
//! 4. **Traces:** A text trace parser plus nine pattern generators calibrated
//!    against a cache geometry by stress level.
//! 5. **Analysis:** Closed-form AMAT, cartesian parameter sweeps with
//!    cost-adjusted scoring, and a multi-configuration comparison runner.
//!
//! The engine is single-threaded and synchronous; every operation returns on
//! the caller's thread, and every random source is explicit and seedable, so
//! a fixed trace and seed reproduce results bitwise.

/// Closed-form average memory access time.
pub mod amat;
/// Set-associative cache, blocks, statistics, and replacement policies.
pub mod cache;
/// Common types and constants (accesses, geometry, errors, hit times).
pub mod common;
/// Comparison runner for named configurations.
pub mod compare;
/// Engine configuration (cache shapes, hierarchy, memory model).
pub mod config;
/// Hierarchy orchestrator routing accesses across levels.
pub mod hierarchy;
/// Main memory model with heat map and bandwidth accounting.
pub mod memory;
/// Parameter-sweep optimizer.
pub mod optimizer;
/// Trace parsing and calibrated pattern generation.
pub mod trace;

/// Single-level cache simulator; construct with `Cache::new`.
pub use crate::cache::{AccessResult, Cache, CacheBlock, CacheLevel, CacheStats};
/// The unit of a trace.
pub use crate::common::Access;
/// Configuration validation error.
pub use crate::common::ConfigError;
/// Configuration types; use the `Default` implementations or deserialize from JSON.
pub use crate::config::{
    CacheConfig, HierarchyConfig, MemoryConfig, MemoryType, ReplacementPolicy, WritePolicy,
};
/// Two-level hierarchy in front of main memory; construct with `Hierarchy::new`.
pub use crate::hierarchy::{DataPath, Hierarchy, HierarchyAccessResult, PathStep};
/// Main memory model types.
pub use crate::memory::{MainMemory, MemoryAccessResult, MemoryRegion, MemoryStats};
