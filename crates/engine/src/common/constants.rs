//! Global Engine Constants.
//!
//! This module defines engine-wide constants used across the simulator. It includes:
//! 1. **Hit Times:** Fixed per-level cache hit latencies.
//! 2. **Memory Model:** Region count, history depth, and the fallback transfer size.
//! 3. **Determinism:** The default seed for every internal random source.

/// L1 cache hit time in cycles.
///
/// Added to the total latency of every access that visits L1, hit or miss.
pub const L1_HIT_CYCLES: u64 = 1;

/// L2 cache hit time in cycles.
///
/// Added to the total latency of every access that visits L2, hit or miss.
pub const L2_HIT_CYCLES: u64 = 10;

/// Number of heat-map regions tracked by the main memory model.
pub const MEMORY_REGION_COUNT: usize = 16;

/// Capacity of the rolling memory access history (oldest entries evicted first).
pub const MEMORY_HISTORY_CAPACITY: usize = 1000;

/// Block size used for memory transfers when no cache level is enabled.
pub const DEFAULT_TRANSFER_BLOCK_BYTES: u32 = 64;

/// Default seed for every internal random source.
///
/// Unseeded construction is still fully deterministic; harnesses override it
/// through the `with_seed` constructors.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE_F00D_D00D;
