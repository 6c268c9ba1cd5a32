//! Configuration Comparison Runner.
//!
//! This module replays one trace against a list of named hierarchy
//! configurations and ranks the outcomes. It provides:
//! 1. **Per-Config Metrics:** Level statistics, combined hit rate, AMAT, and
//!    total cycles for each entry.
//! 2. **Winners:** The best entry per metric, with ties falling to the
//!    earliest entry in the input list.
//!
//! Every configuration gets its own hierarchy and memory model; nothing is
//! shared between entries, so results are order-independent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{Cache, CacheStats};
use crate::common::constants::{L1_HIT_CYCLES, L2_HIT_CYCLES};
use crate::common::data::Access;
use crate::common::error::ConfigError;
use crate::config::{HierarchyConfig, MemoryConfig};
use crate::hierarchy::Hierarchy;

/// A hierarchy configuration with a display name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedConfig {
    /// Display name for reports.
    pub name: String,
    /// The hierarchy to evaluate.
    pub config: HierarchyConfig,
}

/// Metrics for one evaluated configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonEntry {
    /// Display name from the input.
    pub name: String,
    /// L1 statistics, when L1 was enabled.
    pub l1_stats: Option<CacheStats>,
    /// L2 statistics, when L2 was enabled.
    pub l2_stats: Option<CacheStats>,
    /// Combined hit rate across the enabled levels (inclusion-exclusion).
    pub combined_hit_rate: f64,
    /// Average memory access time in cycles.
    pub amat: f64,
    /// Total cycles accumulated over the replay.
    pub total_cycles: u64,
}

/// The full comparison outcome: entries in input order plus winner indices.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// One entry per input configuration, in input order.
    pub entries: Vec<ComparisonEntry>,
    /// Index of the entry with the highest combined hit rate.
    pub best_hit_rate: Option<usize>,
    /// Index of the entry with the lowest AMAT.
    pub best_amat: Option<usize>,
    /// Index of the entry with the fewest total cycles.
    pub best_total_cycles: Option<usize>,
}

/// Replays `trace` against every named configuration and ranks the results.
///
/// An empty trace yields an empty report rather than an error. Invalid
/// geometries surface as `ConfigError` before anything is replayed.
///
/// # Arguments
///
/// * `trace` - The access stream replayed against each configuration.
/// * `configs` - Named hierarchy configurations, evaluated in order.
/// * `memory` - Memory model shared by shape (each entry gets its own instance).
/// * `seed` - Seed for configurations with random replacement.
///
/// # Returns
///
/// The report, or the first invalid configuration's error.
pub fn compare_configs(
    trace: &[Access],
    configs: &[NamedConfig],
    memory: MemoryConfig,
    seed: u64,
) -> Result<ComparisonReport, ConfigError> {
    if trace.is_empty() {
        return Ok(ComparisonReport::default());
    }

    let mut entries = Vec::with_capacity(configs.len());
    for named in configs {
        let mut hierarchy = Hierarchy::with_seed(named.config, memory, seed)?;
        for access in trace {
            let _ = hierarchy.access(access.address, access.is_write);
        }

        let l1_stats = hierarchy.l1().map(Cache::stats);
        let l2_stats = hierarchy.l2().map(Cache::stats);
        let entry = ComparisonEntry {
            name: named.name.clone(),
            combined_hit_rate: combined_hit_rate(l1_stats, l2_stats),
            amat: hierarchy.calculate_amat(L1_HIT_CYCLES as f64, L2_HIT_CYCLES as f64, None),
            total_cycles: hierarchy.total_cycles(),
            l1_stats,
            l2_stats,
        };
        debug!(
            name = %entry.name,
            hit_rate = entry.combined_hit_rate,
            amat = entry.amat,
            cycles = entry.total_cycles,
            "evaluated configuration"
        );
        entries.push(entry);
    }

    let best_hit_rate = argbest(&entries, |a, b| a.combined_hit_rate > b.combined_hit_rate);
    let best_amat = argbest(&entries, |a, b| a.amat < b.amat);
    let best_total_cycles = argbest(&entries, |a, b| a.total_cycles < b.total_cycles);

    Ok(ComparisonReport {
        entries,
        best_hit_rate,
        best_amat,
        best_total_cycles,
    })
}

/// Combined hit rate by inclusion-exclusion over the enabled levels.
///
/// With both levels: `l1 + (1 - l1) * l2`. With one level, that level's rate.
/// With none, zero.
fn combined_hit_rate(l1: Option<CacheStats>, l2: Option<CacheStats>) -> f64 {
    match (l1, l2) {
        (Some(l1), Some(l2)) => {
            let l1_rate = l1.hit_rate();
            l1_rate + (1.0 - l1_rate) * l2.hit_rate()
        }
        (Some(l1), None) => l1.hit_rate(),
        (None, Some(l2)) => l2.hit_rate(),
        (None, None) => 0.0,
    }
}

/// Index of the best entry under `better`; ties keep the earliest entry.
fn argbest(
    entries: &[ComparisonEntry],
    better: impl Fn(&ComparisonEntry, &ComparisonEntry) -> bool,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, entry) in entries.iter().enumerate() {
        match best {
            Some(current) if !better(entry, &entries[current]) => {}
            _ => best = Some(index),
        }
    }
    best
}
