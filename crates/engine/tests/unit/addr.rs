//! Address Geometry Unit Tests.
//!
//! Verifies tag/index/offset decomposition across cache shapes, including
//! the fully associative degenerate case where the index field vanishes.

use cachesim_core::common::addr::Geometry;

// ──────────────────────────────────────────────────────────
// Helper: derive a geometry from the three shape knobs
// ──────────────────────────────────────────────────────────

fn geometry(cache_bytes: u32, block_bytes: u32, ways: u32) -> Geometry {
    Geometry::derive(cache_bytes, block_bytes, ways)
}

// ══════════════════════════════════════════════════════════
// 1. Bit Widths
// ══════════════════════════════════════════════════════════

/// 64 B cache, 16 B blocks, direct-mapped: 4 sets, so 4 offset bits,
/// 2 index bits, and the rest is tag.
#[test]
fn bit_widths_direct_mapped() {
    let g = geometry(64, 16, 1);
    assert_eq!(g.offset_bits, 4);
    assert_eq!(g.index_bits, 2);
    assert_eq!(g.tag_bits, 26);
    assert_eq!(g.num_sets, 4);
}

/// The three field widths always sum to the full 32-bit address.
#[test]
fn bit_widths_sum_to_32() {
    for (size, block, ways) in [
        (64, 16, 1),
        (128, 16, 2),
        (4096, 64, 4),
        (32768, 64, 8),
        (1 << 20, 128, 16),
    ] {
        let g = geometry(size, block, ways);
        assert_eq!(
            g.offset_bits + g.index_bits + g.tag_bits,
            32,
            "size={size} block={block} ways={ways}"
        );
    }
}

// ══════════════════════════════════════════════════════════
// 2. Decomposition
// ══════════════════════════════════════════════════════════

/// Worked example: 64 B / 16 B / 1-way on a mid-range address.
#[test]
fn decompose_worked_example() {
    let g = geometry(64, 16, 1);
    // 0xABCD = 0b1010_1011_1100_1101
    // offset = low 4 bits = 0xD
    // index  = next 2 bits = 0b00
    // tag    = the rest = 0xABC >> 2 = 0x2AF
    let parts = g.decompose(0xABCD);
    assert_eq!(parts.offset, 0xD);
    assert_eq!(parts.index, 0b00);
    assert_eq!(parts.tag, 0xABCD >> 6);
}

/// Addresses one block apart differ only in index (until the index wraps).
#[test]
fn decompose_adjacent_blocks() {
    let g = geometry(128, 16, 2);
    // 4 sets: index cycles with period num_sets * block = 64 bytes.
    let a = g.decompose(0x00);
    let b = g.decompose(0x10);
    let c = g.decompose(0x40);
    assert_eq!(a.index, 0);
    assert_eq!(b.index, 1);
    assert_eq!(c.index, 0, "index wraps after num_sets blocks");
    assert_eq!(a.tag + 1, c.tag, "wrapped index lands in the next tag");
}

/// Reassembling tag/index/offset reproduces the original address.
#[test]
fn decompose_roundtrips() {
    let g = geometry(4096, 64, 4);
    for address in [0u32, 0x40, 0xFFF, 0x1234_5678, 0xFFFF_FFFF] {
        let parts = g.decompose(address);
        let rebuilt = (parts.tag << (g.offset_bits + g.index_bits))
            | (parts.index << g.offset_bits)
            | parts.offset;
        assert_eq!(rebuilt, address);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Fully Associative (zero index bits)
// ══════════════════════════════════════════════════════════

/// A one-set cache decomposes every address to index 0.
#[test]
fn fully_associative_index_is_zero() {
    let g = geometry(64, 16, 4);
    assert_eq!(g.num_sets, 1);
    assert_eq!(g.index_bits, 0);
    for address in [0u32, 0x10, 0x40, 0xDEAD_BEEF, 0xFFFF_FFFF] {
        assert_eq!(g.decompose(address).index, 0);
    }
}

/// With zero index bits the tag is simply the address above the offset.
#[test]
fn fully_associative_tag_covers_rest() {
    let g = geometry(64, 16, 4);
    assert_eq!(g.decompose(0xDEAD_BEEF).tag, 0xDEAD_BEEF >> 4);
}

// ══════════════════════════════════════════════════════════
// 4. Block Base
// ══════════════════════════════════════════════════════════

/// `block_base` clears exactly the offset bits.
#[test]
fn block_base_aligns_down() {
    let g = geometry(4096, 64, 4);
    assert_eq!(g.block_base(0x1000), 0x1000);
    assert_eq!(g.block_base(0x103F), 0x1000);
    assert_eq!(g.block_base(0x1040), 0x1040);
}
