//! Address Geometry and Decomposition.
//!
//! This module splits 32-bit physical addresses into the three fields a
//! set-associative cache indexes by. It provides the following:
//! 1. **Geometry Derivation:** Bit widths computed from a validated configuration.
//! 2. **Decomposition:** Logical-shift extraction of tag, set index, and block offset.
//! 3. **Degenerate Shapes:** Fully associative caches (zero index bits) decompose safely.

use serde::{Deserialize, Serialize};

/// Bit-field layout of an address under a fixed cache shape.
///
/// `offset_bits + index_bits + tag_bits == 32` always holds. A one-set
/// (fully associative) cache has `index_bits == 0`, so every address maps
/// to set 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Bits addressing a byte within a block (`log2(block_bytes)`).
    pub offset_bits: u32,
    /// Bits selecting the set (`log2(num_sets)`).
    pub index_bits: u32,
    /// Remaining high bits forming the tag.
    pub tag_bits: u32,
    /// Number of sets in the cache.
    pub num_sets: u32,
    /// Block size in bytes.
    pub block_bytes: u32,
    /// Associativity (ways per set).
    pub ways: u32,
}

/// The three fields of a decomposed address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressParts {
    /// High-order tag bits, already shifted down.
    pub tag: u32,
    /// Set index in `[0, num_sets)`.
    pub index: u32,
    /// Byte offset within the block.
    pub offset: u32,
}

impl Geometry {
    /// Derives the bit layout for a power-of-two cache shape.
    ///
    /// Callers validate the shape first (see `CacheConfig::validate`); this
    /// only performs the log2 arithmetic.
    ///
    /// # Arguments
    ///
    /// * `cache_bytes` - Total cache capacity in bytes.
    /// * `block_bytes` - Block (line) size in bytes.
    /// * `ways` - Associativity.
    ///
    /// # Returns
    ///
    /// The derived `Geometry`.
    pub fn derive(cache_bytes: u32, block_bytes: u32, ways: u32) -> Self {
        let num_sets = cache_bytes / (block_bytes * ways);
        let offset_bits = block_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        Self {
            offset_bits,
            index_bits,
            tag_bits: 32 - offset_bits - index_bits,
            num_sets,
            block_bytes,
            ways,
        }
    }

    /// Splits an address into tag, set index, and block offset.
    ///
    /// All shifts are logical. With `index_bits == 0` the index mask is zero
    /// and every address lands in set 0.
    ///
    /// # Arguments
    ///
    /// * `address` - The 32-bit physical address to decompose.
    ///
    /// # Returns
    ///
    /// The `AddressParts` of `address` under this geometry.
    #[inline]
    pub fn decompose(&self, address: u32) -> AddressParts {
        let wide = u64::from(address);
        let offset_mask = (1u64 << self.offset_bits) - 1;
        let index_mask = (1u64 << self.index_bits) - 1;
        AddressParts {
            tag: (wide >> (self.offset_bits + self.index_bits)) as u32,
            index: ((wide >> self.offset_bits) & index_mask) as u32,
            offset: (wide & offset_mask) as u32,
        }
    }

    /// Returns the address of the first byte of the block containing `address`.
    #[inline]
    pub fn block_base(&self, address: u32) -> u32 {
        address & !(self.block_bytes - 1)
    }
}
