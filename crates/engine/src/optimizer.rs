//! Parameter-Sweep Optimizer.
//!
//! This module enumerates cache configurations, replays a trace against each,
//! and ranks them by a cost-adjusted performance score. It provides:
//! 1. **Enumeration:** Cartesian products over sizes, associativities, block
//!    sizes, and policies, with invalid shapes silently skipped.
//! 2. **Evaluation:** A fresh engine per candidate, full trace replay, AMAT.
//! 3. **Scoring:** `(1 / AMAT) * 1 / (1 + cost)` where cost grows with the
//!    log of total capacity, so a marginal AMAT win cannot justify doubling
//!    the silicon.
//!
//! Sweeps are deterministic: non-random policies are bitwise reproducible,
//! and random policies replay exactly under a fixed seed. Candidates never
//! share engines, memory models, or random sources.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cache::{Cache, CacheStats};
use crate::common::constants::{DEFAULT_SEED, L1_HIT_CYCLES, L2_HIT_CYCLES};
use crate::common::data::Access;
use crate::config::{CacheConfig, HierarchyConfig, MemoryConfig, ReplacementPolicy, WritePolicy};
use crate::hierarchy::Hierarchy;

/// Cost-factor weight for single-level candidates.
const SINGLE_LEVEL_COST_WEIGHT: f64 = 0.1;

/// Cost-factor weight for two-level candidates.
const MULTI_LEVEL_COST_WEIGHT: f64 = 0.05;

/// Search space for a single-level sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SingleLevelSweep {
    /// Candidate cache sizes in KiB.
    pub sizes_kb: Vec<u32>,
    /// Candidate associativities.
    pub ways: Vec<u32>,
    /// Candidate block sizes in bytes.
    pub block_bytes: Vec<u32>,
    /// Candidate replacement policies.
    pub policies: Vec<ReplacementPolicy>,
    /// Write policy applied to every candidate.
    #[serde(default)]
    pub write_policy: WritePolicy,
    /// Miss penalty in cycles used for AMAT.
    #[serde(default = "SingleLevelSweep::default_penalty")]
    pub memory_penalty_cycles: u64,
    /// Seed for candidates with random replacement.
    #[serde(default = "SingleLevelSweep::default_seed")]
    pub seed: u64,
}

impl SingleLevelSweep {
    /// Returns the default miss penalty in cycles.
    fn default_penalty() -> u64 {
        MemoryConfig::default().latency_cycles
    }

    /// Returns the default sweep seed.
    fn default_seed() -> u64 {
        DEFAULT_SEED
    }
}

/// Search space for a two-level sweep.
///
/// Associativity, block size, and policy candidates apply to both levels;
/// the two size axes are independent, constrained to `l2 > l1` strictly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiLevelSweep {
    /// Candidate L1 sizes in KiB.
    pub l1_sizes_kb: Vec<u32>,
    /// Candidate L2 sizes in KiB.
    pub l2_sizes_kb: Vec<u32>,
    /// Candidate associativities (both levels).
    pub ways: Vec<u32>,
    /// Candidate block sizes in bytes (both levels).
    pub block_bytes: Vec<u32>,
    /// Candidate replacement policies (both levels).
    pub policies: Vec<ReplacementPolicy>,
    /// Write policy applied to every candidate.
    #[serde(default)]
    pub write_policy: WritePolicy,
    /// Memory model evaluated behind every candidate.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Seed for candidates with random replacement.
    #[serde(default = "SingleLevelSweep::default_seed")]
    pub seed: u64,
}

/// One evaluated single-level candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OptimizationResult {
    /// The candidate configuration.
    pub config: CacheConfig,
    /// Statistics after the full replay.
    pub stats: CacheStats,
    /// Hit rate after the full replay.
    pub hit_rate: f64,
    /// Average memory access time in cycles.
    pub amat: f64,
    /// Cost-adjusted score (higher is better).
    pub score: f64,
}

/// One evaluated two-level candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MultiLevelOptimizationResult {
    /// The candidate configuration.
    pub config: HierarchyConfig,
    /// L1 statistics after the full replay.
    pub l1_stats: CacheStats,
    /// L2 statistics after the full replay.
    pub l2_stats: CacheStats,
    /// Combined statistics across both levels.
    pub combined: CacheStats,
    /// Average memory access time in cycles.
    pub amat: f64,
    /// Cost-adjusted score (higher is better).
    pub score: f64,
}

/// Cost-adjusted score: cheap-and-fast beats huge-and-marginally-faster.
#[inline]
fn score(amat: f64, total_size_kb: u32, weight: f64) -> f64 {
    let cost_factor = f64::from(total_size_kb).log2() * weight;
    (1.0 / amat) * (1.0 / (1.0 + cost_factor))
}

/// Evaluates every valid single-level candidate against `trace`.
///
/// Invalid shapes (non-power-of-two, fewer blocks than ways) never enter the
/// candidate list. Every candidate gets a fresh cache seeded from the sweep
/// seed.
///
/// # Arguments
///
/// * `trace` - The access stream replayed against each candidate.
/// * `sweep` - The search space.
///
/// # Returns
///
/// All evaluated candidates, sorted by score descending. Ties keep
/// enumeration order (sizes, then ways, then blocks, then policies).
pub fn run_single_level_sweep(
    trace: &[Access],
    sweep: &SingleLevelSweep,
) -> Vec<OptimizationResult> {
    let mut results = Vec::new();
    let penalty = sweep.memory_penalty_cycles as f64;

    for &size_kb in &sweep.sizes_kb {
        for &ways in &sweep.ways {
            for &block_bytes in &sweep.block_bytes {
                for &policy in &sweep.policies {
                    let config = CacheConfig {
                        size_bytes: size_kb.saturating_mul(1024),
                        block_bytes,
                        ways,
                        policy,
                        write_policy: sweep.write_policy,
                    };
                    let Ok(mut cache) = Cache::with_seed(config, sweep.seed) else {
                        continue;
                    };
                    for access in trace {
                        let _ = cache.access(access.address, access.is_write);
                    }
                    let amat = cache.calculate_amat(L1_HIT_CYCLES as f64, penalty);
                    let result = OptimizationResult {
                        config,
                        stats: cache.stats(),
                        hit_rate: cache.stats().hit_rate(),
                        amat,
                        score: score(amat, config.size_kb().max(1), SINGLE_LEVEL_COST_WEIGHT),
                    };
                    trace!(
                        size_kb,
                        ways, block_bytes, amat = result.amat, score = result.score,
                        "evaluated candidate"
                    );
                    results.push(result);
                }
            }
        }
    }

    debug!(candidates = results.len(), "single-level sweep complete");
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

/// Evaluates every valid two-level candidate against `trace`.
///
/// Candidates with `l2_size <= l1_size` are skipped, as are shapes either
/// level rejects. Each candidate replays the trace through a fresh hierarchy
/// with its own memory model.
///
/// # Returns
///
/// All evaluated candidates, sorted by score descending.
pub fn run_multi_level_sweep(
    trace: &[Access],
    sweep: &MultiLevelSweep,
) -> Vec<MultiLevelOptimizationResult> {
    let mut results = Vec::new();
    let penalty = sweep.memory.latency_cycles as f64;

    for &l1_kb in &sweep.l1_sizes_kb {
        for &l2_kb in &sweep.l2_sizes_kb {
            if l2_kb <= l1_kb {
                continue;
            }
            for &ways in &sweep.ways {
                for &block_bytes in &sweep.block_bytes {
                    for &policy in &sweep.policies {
                        let level = |size_kb: u32| CacheConfig {
                            size_bytes: size_kb.saturating_mul(1024),
                            block_bytes,
                            ways,
                            policy,
                            write_policy: sweep.write_policy,
                        };
                        let config = HierarchyConfig {
                            l1_enabled: true,
                            l1: level(l1_kb),
                            l2_enabled: true,
                            l2: level(l2_kb),
                        };
                        let Ok(mut hierarchy) =
                            Hierarchy::with_seed(config, sweep.memory, sweep.seed)
                        else {
                            continue;
                        };
                        for access in trace {
                            let _ = hierarchy.access(access.address, access.is_write);
                        }
                        let amat = hierarchy.calculate_amat(
                            L1_HIT_CYCLES as f64,
                            L2_HIT_CYCLES as f64,
                            Some(penalty),
                        );
                        let l1_stats = hierarchy.l1().map(Cache::stats).unwrap_or_default();
                        let l2_stats = hierarchy.l2().map(Cache::stats).unwrap_or_default();
                        results.push(MultiLevelOptimizationResult {
                            config,
                            l1_stats,
                            l2_stats,
                            combined: hierarchy.combined_stats(),
                            amat,
                            score: score(amat, l1_kb + l2_kb, MULTI_LEVEL_COST_WEIGHT),
                        });
                    }
                }
            }
        }
    }

    debug!(candidates = results.len(), "multi-level sweep complete");
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}
