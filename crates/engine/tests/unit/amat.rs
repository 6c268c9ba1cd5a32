//! AMAT Calculator Unit Tests.
//!
//! Verifies the closed forms and the zero-access rule (a level that never
//! filtered an access contributes a miss rate of one).

use cachesim_core::amat;
use cachesim_core::config::{HierarchyConfig, MemoryConfig};
use cachesim_core::Hierarchy;

// ══════════════════════════════════════════════════════════
// 1. Closed Forms
// ══════════════════════════════════════════════════════════

/// Single level: `hit + (1 - rate) * penalty`.
#[test]
fn single_level_form() {
    assert!((amat::single_level(1.0, 0.9, 100.0) - 11.0).abs() < 1e-12);
    assert!((amat::single_level(1.0, 0.0, 100.0) - 101.0).abs() < 1e-12);
    assert!((amat::single_level(1.0, 1.0, 100.0) - 1.0).abs() < 1e-12);
}

/// Two level: the L2 expression is L1's miss penalty.
#[test]
fn two_level_form() {
    // 1 + 0.2 * (10 + 0.5 * 100) = 1 + 0.2 * 60 = 13.
    let value = amat::two_level(1.0, 0.8, 10.0, 0.5, 100.0);
    assert!((value - 13.0).abs() < 1e-12);
}

// ══════════════════════════════════════════════════════════
// 2. Hierarchy Integration
// ══════════════════════════════════════════════════════════

/// With no levels enabled the AMAT is the memory penalty itself.
#[test]
fn no_levels_amat_is_penalty() {
    let config = HierarchyConfig {
        l1_enabled: false,
        l2_enabled: false,
        ..HierarchyConfig::default()
    };
    let hierarchy = Hierarchy::new(config, MemoryConfig::default()).unwrap();
    let value = hierarchy.calculate_amat(1.0, 10.0, Some(100.0));
    assert!((value - 100.0).abs() < 1e-12);
}

/// A fresh hierarchy has zero accesses everywhere, so every miss rate is
/// one and the AMAT is the full walk.
#[test]
fn fresh_hierarchy_full_walk() {
    let hierarchy = Hierarchy::new(HierarchyConfig::default(), MemoryConfig::default()).unwrap();
    // 1 + 1.0 * (10 + 1.0 * 100) = 111.
    let value = hierarchy.calculate_amat(1.0, 10.0, Some(100.0));
    assert!((value - 111.0).abs() < 1e-12);
}

/// The default penalty is the memory base latency.
#[test]
fn default_penalty_is_memory_latency() {
    let memory = MemoryConfig {
        latency_cycles: 250,
        ..MemoryConfig::default()
    };
    let config = HierarchyConfig {
        l1_enabled: false,
        l2_enabled: false,
        ..HierarchyConfig::default()
    };
    let hierarchy = Hierarchy::new(config, memory).unwrap();
    let value = hierarchy.calculate_amat(1.0, 10.0, None);
    assert!((value - 250.0).abs() < 1e-12);
}

/// AMAT over measured stats matches the formula applied by hand.
#[test]
fn measured_stats_match_formula() {
    let mut hierarchy = Hierarchy::new(HierarchyConfig::default(), MemoryConfig::default()).unwrap();
    // Two accesses to the same block: one full miss, one L1 hit.
    let _ = hierarchy.access(0x40, false);
    let _ = hierarchy.access(0x40, false);

    let l1_rate = hierarchy.l1().unwrap().stats().hit_rate();
    let l2_rate = hierarchy.l2().unwrap().stats().hit_rate();
    assert!((l1_rate - 0.5).abs() < 1e-12);
    assert!((l2_rate - 0.0).abs() < 1e-12);

    let expected = amat::two_level(1.0, l1_rate, 10.0, l2_rate, 100.0);
    let value = hierarchy.calculate_amat(1.0, 10.0, Some(100.0));
    assert!((value - expected).abs() < 1e-12);
}
