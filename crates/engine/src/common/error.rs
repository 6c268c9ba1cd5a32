//! Configuration Error Definitions.
//!
//! This module defines the error type raised when a cache or hierarchy is
//! constructed from an invalid geometry. It provides the following:
//! 1. **Typed Rejection:** Every geometry invariant has a dedicated variant.
//! 2. **Construction-Time Only:** Runtime `access` paths are total and never error.
//! 3. **Reporting:** Messages carry the offending value for direct display.

use thiserror::Error;

/// Rejection reasons for an invalid cache geometry.
///
/// A simulator built from an invalid configuration must never come into
/// existence, so these surface from constructors before any statistics can
/// be produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Total cache size is zero or not a power of two.
    #[error("cache size must be a power of two, got {0} bytes")]
    CacheSizeNotPowerOfTwo(u32),

    /// Block size is zero or not a power of two.
    #[error("block size must be a power of two, got {0} bytes")]
    BlockSizeNotPowerOfTwo(u32),

    /// Block size is below the 4-byte minimum.
    #[error("block size must be at least 4 bytes, got {0}")]
    BlockSizeTooSmall(u32),

    /// Associativity is zero or not a power of two.
    #[error("associativity must be a power of two, got {0} ways")]
    WaysNotPowerOfTwo(u32),

    /// The cache cannot hold a single block.
    #[error("cache of {cache_bytes} bytes cannot hold one {block_bytes}-byte block")]
    BlockLargerThanCache {
        /// Total cache size in bytes.
        cache_bytes: u32,
        /// Block size in bytes.
        block_bytes: u32,
    },

    /// Fewer blocks than ways: at least one full set must exist.
    #[error("{cache_bytes}-byte cache with {block_bytes}-byte blocks holds fewer blocks than {ways} ways")]
    TooFewBlocksForWays {
        /// Total cache size in bytes.
        cache_bytes: u32,
        /// Block size in bytes.
        block_bytes: u32,
        /// Requested associativity.
        ways: u32,
    },
}
