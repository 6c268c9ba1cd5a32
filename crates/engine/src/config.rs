//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the engine. It provides:
//! 1. **Defaults:** Baseline hardware constants (cache shape, memory timing, bus widths).
//! 2. **Structures:** Per-level cache config, two-level hierarchy config, and main memory config.
//! 3. **Enums:** Replacement policy, write policy, and memory technology types.
//! 4. **Validation:** Power-of-two geometry invariants enforced before any engine is built.
//!
//! Configuration is supplied via JSON from an embedding shell or built in code with
//! the `Default` implementations.

use serde::{Deserialize, Serialize};

use crate::common::addr::Geometry;
use crate::common::error::ConfigError;

/// Default configuration constants for the engine.
///
/// These values define the baseline configuration when not explicitly
/// overridden by the caller.
mod defaults {
    /// Default L1 cache size in bytes (4 KiB).
    pub const CACHE_SIZE_BYTES: u32 = 4096;

    /// Default cache block size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes and DRAM burst length.
    pub const BLOCK_BYTES: u32 = 64;

    /// Default cache associativity (1 way = direct-mapped).
    pub const WAYS: u32 = 1;

    /// Default L2 cache size in bytes (32 KiB).
    pub const L2_SIZE_BYTES: u32 = 32 * 1024;

    /// Default L2 associativity.
    pub const L2_WAYS: u32 = 4;

    /// Default main memory capacity in MiB.
    pub const MEMORY_SIZE_MB: u32 = 64;

    /// Default main memory base latency in cycles.
    pub const MEMORY_LATENCY_CYCLES: u64 = 100;

    /// Default memory bus width in bits.
    pub const BUS_WIDTH_BITS: u32 = 64;

    /// Default memory clock in MHz.
    pub const FREQUENCY_MHZ: u32 = 2400;

    /// Default burst length in bus transfers.
    pub const BURST_LENGTH: u32 = 8;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache block to evict
/// when a new block must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the block with the oldest access stamp; ties fall to the
    /// lowest way index.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the block with the oldest installation stamp, ignoring hits.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Least Frequently Used replacement policy.
    ///
    /// Evicts the block with the smallest access count; ties fall to the
    /// oldest access stamp, then the lowest way index.
    #[serde(alias = "Lfu")]
    Lfu,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly chosen way using a seedable random source.
    #[serde(alias = "Random")]
    Random,
}

/// Write handling policy for a cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WritePolicy {
    /// Write-back: writes dirty the block; memory is updated on eviction.
    #[default]
    WriteBack,
    /// Write-through: memory is always current, so blocks are never dirty.
    WriteThrough,
}

/// Main memory technology types.
///
/// Double-data-rate technologies transfer on both clock edges, which doubles
/// the theoretical peak bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemoryType {
    /// DDR3 SDRAM.
    Ddr3,
    /// DDR4 SDRAM.
    #[default]
    Ddr4,
    /// DDR5 SDRAM.
    Ddr5,
    /// Static RAM (single data rate).
    Sram,
    /// User-defined technology (single data rate).
    Custom,
}

impl MemoryType {
    /// Data-rate multiplier for peak-bandwidth calculations (2 for DDR*).
    #[inline]
    pub const fn data_rate(self) -> u32 {
        match self {
            Self::Ddr3 | Self::Ddr4 | Self::Ddr5 => 2,
            Self::Sram | Self::Custom => 1,
        }
    }
}

/// Individual cache level configuration.
///
/// # Examples
///
/// Deserializing from JSON (typical shell usage):
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};
///
/// let json = r#"{
///     "size_bytes": 32768,
///     "block_bytes": 64,
///     "ways": 4,
///     "policy": "LFU",
///     "write_policy": "WriteThrough"
/// }"#;
///
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.size_bytes, 32768);
/// assert_eq!(config.policy, ReplacementPolicy::Lfu);
/// assert_eq!(config.write_policy, WritePolicy::WriteThrough);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes (power of two).
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u32,

    /// Cache block size in bytes (power of two, at least 4).
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: u32,

    /// Associativity (number of ways, power of two).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u32,

    /// Replacement policy.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Write handling policy.
    #[serde(default)]
    pub write_policy: WritePolicy,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> u32 {
        defaults::CACHE_SIZE_BYTES
    }

    /// Returns the default cache block size in bytes.
    fn default_block() -> u32 {
        defaults::BLOCK_BYTES
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> u32 {
        defaults::WAYS
    }

    /// Checks every geometry invariant.
    ///
    /// Size, block size, and associativity must be powers of two; blocks are
    /// at least 4 bytes; the cache must hold at least `ways` blocks. With all
    /// three powers of two the set count is automatically a power of two.
    ///
    /// # Returns
    ///
    /// `Ok(())` for a buildable shape, otherwise the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size_bytes == 0 || !self.size_bytes.is_power_of_two() {
            return Err(ConfigError::CacheSizeNotPowerOfTwo(self.size_bytes));
        }
        if self.block_bytes == 0 || !self.block_bytes.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(self.block_bytes));
        }
        if self.block_bytes < 4 {
            return Err(ConfigError::BlockSizeTooSmall(self.block_bytes));
        }
        if self.ways == 0 || !self.ways.is_power_of_two() {
            return Err(ConfigError::WaysNotPowerOfTwo(self.ways));
        }
        if self.block_bytes > self.size_bytes {
            return Err(ConfigError::BlockLargerThanCache {
                cache_bytes: self.size_bytes,
                block_bytes: self.block_bytes,
            });
        }
        if self.size_bytes / self.block_bytes < self.ways {
            return Err(ConfigError::TooFewBlocksForWays {
                cache_bytes: self.size_bytes,
                block_bytes: self.block_bytes,
                ways: self.ways,
            });
        }
        Ok(())
    }

    /// Derives the address geometry after validation.
    ///
    /// # Returns
    ///
    /// The `Geometry` for this shape, or the first violated invariant.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        self.validate()?;
        Ok(Geometry::derive(self.size_bytes, self.block_bytes, self.ways))
    }

    /// Total number of blocks held by the cache.
    #[inline]
    pub const fn num_blocks(&self) -> u32 {
        self.size_bytes / self.block_bytes
    }

    /// Number of sets (`size / (block * ways)`).
    #[inline]
    pub const fn num_sets(&self) -> u32 {
        self.size_bytes / (self.block_bytes * self.ways)
    }

    /// Cache capacity in KiB.
    #[inline]
    pub const fn size_kb(&self) -> u32 {
        self.size_bytes / 1024
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration: 4 KiB, 64-byte blocks,
    /// direct-mapped, LRU, write-back.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE_BYTES,
            block_bytes: defaults::BLOCK_BYTES,
            ways: defaults::WAYS,
            policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
        }
    }
}

/// Two-level cache hierarchy configuration.
///
/// Either level may be disabled. With both levels disabled every access is a
/// direct memory access.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let json = r#"{
///     "l1_enabled": true,
///     "l1": { "size_bytes": 4096, "block_bytes": 64, "ways": 2 },
///     "l2_enabled": false
/// }"#;
///
/// let config: HierarchyConfig = serde_json::from_str(json).unwrap();
/// assert!(config.l1_enabled);
/// assert!(!config.l2_enabled);
/// assert_eq!(config.l1.ways, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Enable the L1 level.
    #[serde(default = "HierarchyConfig::default_enabled")]
    pub l1_enabled: bool,

    /// L1 cache shape.
    #[serde(default)]
    pub l1: CacheConfig,

    /// Enable the L2 level.
    #[serde(default = "HierarchyConfig::default_enabled")]
    pub l2_enabled: bool,

    /// L2 cache shape.
    #[serde(default = "HierarchyConfig::default_l2")]
    pub l2: CacheConfig,
}

impl HierarchyConfig {
    /// Levels are enabled unless explicitly switched off.
    fn default_enabled() -> bool {
        true
    }

    /// Returns the default L2 shape (32 KiB, 4-way).
    fn default_l2() -> CacheConfig {
        CacheConfig {
            size_bytes: defaults::L2_SIZE_BYTES,
            ways: defaults::L2_WAYS,
            ..CacheConfig::default()
        }
    }

    /// Validates every enabled level.
    ///
    /// Disabled levels are not checked; their shapes are never used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.l1_enabled {
            self.l1.validate()?;
        }
        if self.l2_enabled {
            self.l2.validate()?;
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    /// Creates a default hierarchy: L1 and L2 both enabled.
    fn default() -> Self {
        Self {
            l1_enabled: true,
            l1: CacheConfig::default(),
            l2_enabled: true,
            l2: Self::default_l2(),
        }
    }
}

/// Main memory model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Physical capacity in MiB; addresses wrap modulo this size.
    #[serde(default = "MemoryConfig::default_size_mb")]
    pub size_mb: u32,

    /// Base access latency in cycles, before burst transfer time.
    #[serde(default = "MemoryConfig::default_latency")]
    pub latency_cycles: u64,

    /// Data bus width in bits (32, 64, 128, or 256).
    #[serde(default = "MemoryConfig::default_bus_width")]
    pub bus_width_bits: u32,

    /// Memory clock in MHz.
    #[serde(default = "MemoryConfig::default_frequency")]
    pub frequency_mhz: u32,

    /// Memory technology (determines the data-rate multiplier).
    #[serde(default)]
    pub memory_type: MemoryType,

    /// Burst length in bus-width transfers.
    #[serde(default = "MemoryConfig::default_burst")]
    pub burst_length: u32,
}

impl MemoryConfig {
    /// Returns the default memory capacity in MiB.
    fn default_size_mb() -> u32 {
        defaults::MEMORY_SIZE_MB
    }

    /// Returns the default base latency in cycles.
    fn default_latency() -> u64 {
        defaults::MEMORY_LATENCY_CYCLES
    }

    /// Returns the default bus width in bits.
    fn default_bus_width() -> u32 {
        defaults::BUS_WIDTH_BITS
    }

    /// Returns the default memory clock in MHz.
    fn default_frequency() -> u32 {
        defaults::FREQUENCY_MHZ
    }

    /// Returns the default burst length.
    fn default_burst() -> u32 {
        defaults::BURST_LENGTH
    }
}

impl Default for MemoryConfig {
    /// Creates a default memory configuration: 64 MiB DDR4 on a 64-bit bus.
    fn default() -> Self {
        Self {
            size_mb: defaults::MEMORY_SIZE_MB,
            latency_cycles: defaults::MEMORY_LATENCY_CYCLES,
            bus_width_bits: defaults::BUS_WIDTH_BITS,
            frequency_mhz: defaults::FREQUENCY_MHZ,
            memory_type: MemoryType::default(),
            burst_length: defaults::BURST_LENGTH,
        }
    }
}
