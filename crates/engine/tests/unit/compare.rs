//! Comparison Runner Tests.
//!
//! Verifies per-configuration metrics, inclusion-exclusion combined hit
//! rates, winner selection with input-order tie-breaks, and the empty-trace
//! contract.

use cachesim_core::compare::{NamedConfig, compare_configs};
use cachesim_core::config::{
    CacheConfig, HierarchyConfig, MemoryConfig, ReplacementPolicy,
};
use cachesim_core::trace::generators::{self, GeometryHint, StressLevel};
use cachesim_core::Access;

use crate::common::shape;

// ──────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────

fn l1_only(l1: CacheConfig) -> HierarchyConfig {
    HierarchyConfig {
        l1_enabled: true,
        l1,
        l2_enabled: false,
        ..HierarchyConfig::default()
    }
}

/// A locality-rich trace a bigger cache will win on.
fn trace() -> Vec<Access> {
    let mut rng = fastrand::Rng::with_seed(5);
    generators::working_set(
        0,
        600,
        &GeometryHint::default(),
        StressLevel::Moderate,
        &mut rng,
    )
}

fn contenders() -> Vec<NamedConfig> {
    vec![
        NamedConfig {
            name: "tiny".into(),
            config: l1_only(shape(1024, 2, 64, ReplacementPolicy::Lru)),
        },
        NamedConfig {
            name: "roomy".into(),
            config: l1_only(shape(16 * 1024, 4, 64, ReplacementPolicy::Lru)),
        },
    ]
}

// ══════════════════════════════════════════════════════════
// 1. Entries
// ══════════════════════════════════════════════════════════

/// One entry per input, in input order, with level stats present only for
/// enabled levels.
#[test]
fn entries_mirror_inputs() {
    let report = compare_configs(&trace(), &contenders(), MemoryConfig::default(), 1).unwrap();

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].name, "tiny");
    assert_eq!(report.entries[1].name, "roomy");
    for entry in &report.entries {
        assert!(entry.l1_stats.is_some());
        assert!(entry.l2_stats.is_none());
    }
}

/// With only L1 enabled the combined hit rate is L1's own.
#[test]
fn single_level_combined_rate() {
    let report = compare_configs(&trace(), &contenders(), MemoryConfig::default(), 1).unwrap();
    for entry in &report.entries {
        let l1 = entry.l1_stats.unwrap();
        assert!((entry.combined_hit_rate - l1.hit_rate()).abs() < 1e-12);
    }
}

/// With both levels the combined rate follows inclusion-exclusion.
#[test]
fn two_level_combined_rate() {
    let configs = vec![NamedConfig {
        name: "two-level".into(),
        config: HierarchyConfig {
            l1_enabled: true,
            l1: shape(1024, 2, 64, ReplacementPolicy::Lru),
            l2_enabled: true,
            l2: shape(8 * 1024, 4, 64, ReplacementPolicy::Lru),
        },
    }];
    let report = compare_configs(&trace(), &configs, MemoryConfig::default(), 1).unwrap();

    let entry = &report.entries[0];
    let l1 = entry.l1_stats.unwrap().hit_rate();
    let l2 = entry.l2_stats.unwrap().hit_rate();
    let expected = l1 + (1.0 - l1) * l2;
    assert!((entry.combined_hit_rate - expected).abs() < 1e-12);
}

// ══════════════════════════════════════════════════════════
// 2. Winners
// ══════════════════════════════════════════════════════════

/// The roomy cache wins every metric on a locality-rich trace.
#[test]
fn roomy_cache_sweeps_metrics() {
    let report = compare_configs(&trace(), &contenders(), MemoryConfig::default(), 1).unwrap();

    assert_eq!(report.best_hit_rate, Some(1));
    assert_eq!(report.best_amat, Some(1));
    assert_eq!(report.best_total_cycles, Some(1));
}

/// Identical configurations tie on every metric; the earliest entry wins.
#[test]
fn ties_fall_to_first_entry() {
    let twin = NamedConfig {
        name: "twin".into(),
        config: l1_only(shape(4096, 2, 64, ReplacementPolicy::Lru)),
    };
    let configs = vec![
        NamedConfig {
            name: "first".into(),
            ..twin.clone()
        },
        twin,
    ];
    let report = compare_configs(&trace(), &configs, MemoryConfig::default(), 1).unwrap();

    assert_eq!(report.best_hit_rate, Some(0));
    assert_eq!(report.best_amat, Some(0));
    assert_eq!(report.best_total_cycles, Some(0));
}

// ══════════════════════════════════════════════════════════
// 3. Edge Cases
// ══════════════════════════════════════════════════════════

/// An empty trace yields an empty report, not an error.
#[test]
fn empty_trace_empty_report() {
    let report = compare_configs(&[], &contenders(), MemoryConfig::default(), 1).unwrap();
    assert!(report.entries.is_empty());
    assert_eq!(report.best_hit_rate, None);
    assert_eq!(report.best_amat, None);
    assert_eq!(report.best_total_cycles, None);
}

/// An invalid configuration surfaces as a construction error.
#[test]
fn invalid_config_errors() {
    let configs = vec![NamedConfig {
        name: "broken".into(),
        config: l1_only(CacheConfig {
            size_bytes: 3000,
            ..CacheConfig::default()
        }),
    }];
    assert!(compare_configs(&trace(), &configs, MemoryConfig::default(), 1).is_err());
}

/// Total cycles equal the hierarchy's accumulated latency: strictly
/// positive for a non-empty trace.
#[test]
fn total_cycles_positive() {
    let report = compare_configs(&trace(), &contenders(), MemoryConfig::default(), 1).unwrap();
    for entry in &report.entries {
        assert!(entry.total_cycles >= trace().len() as u64);
    }
}
