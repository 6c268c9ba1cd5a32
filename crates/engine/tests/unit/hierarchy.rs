//! Hierarchy Orchestrator Unit Tests.
//!
//! Verifies access routing across L1, L2, and memory: data paths, latency
//! accumulation, independent lookups, combined statistics, the transfer
//! block size rule, and reset behavior.

use cachesim_core::config::{CacheConfig, HierarchyConfig, MemoryConfig, ReplacementPolicy};
use cachesim_core::hierarchy::PathStep;
use cachesim_core::{CacheLevel, Hierarchy};

use crate::common::shape;

// ──────────────────────────────────────────────────────────
// Helpers: tiny two-level setup
// ──────────────────────────────────────────────────────────

/// L1: 32 B / 1-way / 16 B blocks (2 sets). L2: 64 B / 1-way / 16 B (4 sets).
fn tiny_config() -> HierarchyConfig {
    HierarchyConfig {
        l1_enabled: true,
        l1: shape(32, 1, 16, ReplacementPolicy::Lru),
        l2_enabled: true,
        l2: shape(64, 1, 16, ReplacementPolicy::Lru),
    }
}

/// 100-cycle base latency, 64-bit bus, burst 8: memory access costs 108.
fn memory_config() -> MemoryConfig {
    MemoryConfig {
        size_mb: 1,
        ..MemoryConfig::default()
    }
}

fn tiny_hierarchy() -> Hierarchy {
    Hierarchy::new(tiny_config(), memory_config()).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Routing and Latency
// ══════════════════════════════════════════════════════════

/// A cold access walks L1 → L2 → memory and pays every stop's cost.
#[test]
fn cold_access_walks_all_levels() {
    let mut hierarchy = tiny_hierarchy();
    let result = hierarchy.access(0x00, false);

    assert_eq!(
        result.data_path.as_slice(),
        &[PathStep::L1, PathStep::L2, PathStep::Memory]
    );
    // 1 (L1) + 10 (L2) + 108 (memory with burst).
    assert_eq!(result.total_latency_cycles, 119);
    assert!(!result.l1.unwrap().hit);
    assert!(!result.l2.unwrap().hit);
    assert!(result.memory.is_some());
}

/// A warm access stops at L1 and costs exactly the L1 hit time.
#[test]
fn warm_access_stops_at_l1() {
    let mut hierarchy = tiny_hierarchy();
    let _ = hierarchy.access(0x00, false);
    let result = hierarchy.access(0x00, false);

    assert_eq!(result.data_path.as_slice(), &[PathStep::L1]);
    assert_eq!(result.total_latency_cycles, 1);
    assert!(result.l1.unwrap().hit);
    assert!(result.l2.is_none());
    assert!(result.memory.is_none());
}

/// An access that misses L1 but hits L2 stops there, paying both hit times.
#[test]
fn l2_hit_costs_both_hit_times() {
    let mut hierarchy = tiny_hierarchy();
    // 0x00 and 0x20 collide in L1 (2 sets) but occupy different L2 sets
    // (4 sets), so evicting 0x00 from L1 leaves it live in L2.
    let _ = hierarchy.access(0x00, false);
    let _ = hierarchy.access(0x20, false);
    let result = hierarchy.access(0x00, false);

    assert_eq!(result.data_path.as_slice(), &[PathStep::L1, PathStep::L2]);
    assert_eq!(result.total_latency_cycles, 11);
    assert!(!result.l1.unwrap().hit);
    assert!(result.l2.unwrap().hit);
}

/// Per-level results carry their level markers.
#[test]
fn results_carry_level_markers() {
    let mut hierarchy = tiny_hierarchy();
    let result = hierarchy.access(0x00, false);
    assert_eq!(result.l1.unwrap().level, CacheLevel::L1);
    assert_eq!(result.l2.unwrap().level, CacheLevel::L2);
}

/// `memory_accessed` is stamped on every missing level when the walk
/// reaches memory, and on none when it does not.
#[test]
fn memory_accessed_flags() {
    let mut hierarchy = tiny_hierarchy();
    let cold = hierarchy.access(0x00, false);
    assert!(cold.l1.unwrap().memory_accessed);
    assert!(cold.l2.unwrap().memory_accessed);

    let warm = hierarchy.access(0x00, false);
    assert!(!warm.l1.unwrap().memory_accessed);
}

// ══════════════════════════════════════════════════════════
// 2. Partial Hierarchies
// ══════════════════════════════════════════════════════════

/// With only L2 enabled the walk is L2 → memory.
#[test]
fn l2_only_routing() {
    let config = HierarchyConfig {
        l1_enabled: false,
        ..tiny_config()
    };
    let mut hierarchy = Hierarchy::new(config, memory_config()).unwrap();

    let cold = hierarchy.access(0x00, false);
    assert_eq!(cold.data_path.as_slice(), &[PathStep::L2, PathStep::Memory]);
    assert!(cold.l1.is_none());
    assert_eq!(cold.total_latency_cycles, 10 + 108);

    let warm = hierarchy.access(0x00, false);
    assert_eq!(warm.data_path.as_slice(), &[PathStep::L2]);
    assert_eq!(warm.total_latency_cycles, 10);
}

/// With both levels disabled every access is a direct memory access and a
/// combined miss.
#[test]
fn no_levels_direct_memory() {
    let config = HierarchyConfig {
        l1_enabled: false,
        l2_enabled: false,
        ..tiny_config()
    };
    let mut hierarchy = Hierarchy::new(config, memory_config()).unwrap();

    let result = hierarchy.access(0x00, false);
    assert_eq!(result.data_path.as_slice(), &[PathStep::Memory]);
    assert!(result.l1.is_none() && result.l2.is_none());
    // Default transfer block is 64 bytes: same 108-cycle cost.
    assert_eq!(result.total_latency_cycles, 108);

    let combined = hierarchy.combined_stats();
    assert_eq!(combined.hits, 0);
    assert_eq!(combined.misses, 1);
    assert_eq!(combined.total_accesses, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Independent Lookups
// ══════════════════════════════════════════════════════════

/// L1 and L2 fill independently: no inclusion is enforced, so an L1
/// eviction leaves the L2 copy untouched.
#[test]
fn no_inclusion_enforcement() {
    let mut hierarchy = tiny_hierarchy();
    let _ = hierarchy.access(0x00, false); // installs in both
    let _ = hierarchy.access(0x20, false); // evicts 0x00 from L1 only

    let l2 = hierarchy.l2().unwrap();
    let l2_sets = l2.sets();
    // 0x00 still valid in L2 set 0 (tag 0).
    assert!(l2_sets[0][0].valid);
    assert_eq!(l2_sets[0][0].tag, 0);
}

// ══════════════════════════════════════════════════════════
// 4. Combined Statistics
// ══════════════════════════════════════════════════════════

/// Combined counters count accesses, not level visits.
#[test]
fn combined_counts_accesses() {
    let mut hierarchy = tiny_hierarchy();
    let _ = hierarchy.access(0x00, false); // full miss
    let _ = hierarchy.access(0x00, false); // L1 hit
    let _ = hierarchy.access(0x20, false); // full miss
    let _ = hierarchy.access(0x00, false); // L1 miss, L2 hit

    let combined = hierarchy.combined_stats();
    assert_eq!(combined.total_accesses, 4);
    assert_eq!(combined.hits, 2);
    assert_eq!(combined.misses, 2);
}

/// Combined writebacks sum the levels.
#[test]
fn combined_writebacks_sum_levels() {
    let mut hierarchy = tiny_hierarchy();
    let _ = hierarchy.access(0x00, true); // dirty in L1 and L2
    let _ = hierarchy.access(0x20, false); // evicts dirty 0x00 from L1
    let combined = hierarchy.combined_stats();
    assert_eq!(combined.writebacks, 1);
}

/// Total cycles grow monotonically and every access contributes at least
/// one cycle.
#[test]
fn total_cycles_monotone() {
    let mut hierarchy = tiny_hierarchy();
    let mut previous = 0;
    for i in 0..20u32 {
        let result = hierarchy.access((i % 3) * 0x10, i % 4 == 0);
        assert!(result.total_latency_cycles >= 1);
        let now = hierarchy.total_cycles();
        assert!(now > previous);
        previous = now;
    }
}

// ══════════════════════════════════════════════════════════
// 5. Transfer Block Size
// ══════════════════════════════════════════════════════════

/// Memory transfers use L1's block size when L1 is enabled, else L2's.
#[test]
fn transfer_block_follows_levels() {
    // L1 disabled, L2 with 256-byte blocks: transfer = 256 bytes.
    let config = HierarchyConfig {
        l1_enabled: false,
        l2: shape(1024, 1, 256, ReplacementPolicy::Lru),
        ..tiny_config()
    };
    let mut hierarchy = Hierarchy::new(config, memory_config()).unwrap();
    let result = hierarchy.access(0x00, false);
    assert_eq!(result.memory.unwrap().bytes_transferred, 256);
}

// ══════════════════════════════════════════════════════════
// 6. Reset
// ══════════════════════════════════════════════════════════

/// Reset restores levels, memory, and combined counters together.
#[test]
fn reset_restores_everything() {
    let mut hierarchy = tiny_hierarchy();
    for i in 0..8u32 {
        let _ = hierarchy.access(i * 0x10, i % 2 == 0);
    }
    hierarchy.reset();

    assert_eq!(hierarchy.combined_stats(), Default::default());
    assert_eq!(hierarchy.total_cycles(), 0);
    assert_eq!(hierarchy.memory_stats().total_accesses, 0);
    assert_eq!(hierarchy.l1().unwrap().stats(), Default::default());

    // First access after reset is a cold full miss again.
    let result = hierarchy.access(0x00, false);
    assert_eq!(result.total_latency_cycles, 119);
}

// ══════════════════════════════════════════════════════════
// 7. Construction Errors
// ══════════════════════════════════════════════════════════

/// An invalid enabled level fails construction before any stats exist.
#[test]
fn invalid_enabled_level_rejected() {
    let config = HierarchyConfig {
        l1: CacheConfig {
            size_bytes: 3000,
            ..CacheConfig::default()
        },
        ..tiny_config()
    };
    assert!(Hierarchy::new(config, memory_config()).is_err());
}
