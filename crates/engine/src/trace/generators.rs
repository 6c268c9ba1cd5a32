//! Calibrated Trace Pattern Generators.
//!
//! This module produces access streams whose difficulty scales with a target
//! cache geometry, so the same stress level behaves comparably across very
//! different cache shapes. It provides the following:
//! 1. **Stress Levels:** Working-set sizing as a ratio of L1 capacity
//!    (0.5x, 1.5x, 3.0x, 8.0x) plus per-pattern tuning tables.
//! 2. **Patterns:** Nine generators covering spatial locality, capacity
//!    pressure, conflict pressure, and policy-discriminating reuse.
//! 3. **Documentation Contract:** A `GeneratorInfo` record per pattern
//!    describing what it tests and how the stress level tunes it.
//!
//! Every stochastic generator takes an explicit seeded random source; none
//! touches a process-wide one, so a fixed seed reproduces the exact stream.

use serde::{Deserialize, Serialize};

use crate::common::data::Access;
use crate::config::CacheConfig;

/// Address spacing used by the conflict-storm pattern.
///
/// One MiB exceeds `num_sets * block_bytes` for any cache up to 1 MiB, so
/// consecutive addresses collapse into a single set while carrying distinct
/// tags.
const CONFLICT_STRIDE: u32 = 1 << 20;

/// Calibration parameter scaling trace difficulty against the cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StressLevel {
    /// Working set fits comfortably (0.5x L1).
    Light,
    /// Working set slightly exceeds capacity (1.5x L1).
    #[default]
    Moderate,
    /// Working set well beyond capacity (3.0x L1).
    Heavy,
    /// Working set overwhelms the cache (8.0x L1).
    Extreme,
}

impl StressLevel {
    /// Working-set size as a ratio of L1 capacity.
    #[inline]
    pub const fn working_set_ratio(self) -> f64 {
        match self {
            Self::Light => 0.5,
            Self::Moderate => 1.5,
            Self::Heavy => 3.0,
            Self::Extreme => 8.0,
        }
    }

    /// Stride multiplier (in units of `num_sets * block_bytes`) for the
    /// strided pattern.
    #[inline]
    pub const fn stride_multiplier(self) -> f64 {
        match self {
            Self::Light => 0.25,
            Self::Moderate => 0.5,
            Self::Heavy => 1.0,
            Self::Extreme => 2.0,
        }
    }

    /// Loop-window factor (in units of L1 capacity) for the thrashing pattern.
    #[inline]
    pub const fn thrash_factor(self) -> f64 {
        match self {
            Self::Light => 1.3,
            Self::Moderate => 2.0,
            Self::Heavy => 4.0,
            Self::Extreme => 10.0,
        }
    }

    /// Associativity the conflict-storm pattern is aimed at.
    #[inline]
    pub const fn conflict_ways(self) -> u32 {
        match self {
            Self::Light => 2,
            Self::Moderate => 4,
            Self::Heavy => 8,
            Self::Extreme => 16,
        }
    }

    /// Hot and cold footprint ratios (of the working set) for the temporal
    /// pattern. The hot fraction shrinks while the cold sweep grows past the
    /// working set itself.
    #[inline]
    pub const fn hot_cold_ratios(self) -> (f64, f64) {
        match self {
            Self::Light => (0.7, 0.3),
            Self::Moderate => (0.5, 1.0),
            Self::Heavy => (0.3, 2.0),
            Self::Extreme => (0.2, 5.0),
        }
    }

    /// Zipf exponent for the zipfian pattern; flatter distributions are
    /// harder on any cache.
    #[inline]
    pub const fn zipf_skew(self) -> f64 {
        match self {
            Self::Light => 1.5,
            Self::Moderate => 1.1,
            Self::Heavy => 0.8,
            Self::Extreme => 0.5,
        }
    }
}

/// The geometry facts generators calibrate against.
///
/// Usually taken from the L1 configuration; the `Default` shape matches the
/// default cache configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryHint {
    /// Target cache capacity in bytes.
    pub cache_bytes: u32,
    /// Block size in bytes.
    pub block_bytes: u32,
    /// Number of sets.
    pub num_sets: u32,
    /// Associativity.
    pub ways: u32,
}

impl Default for GeometryHint {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for GeometryHint {
    fn from(config: &CacheConfig) -> Self {
        Self {
            cache_bytes: config.size_bytes,
            block_bytes: config.block_bytes,
            num_sets: config.num_sets(),
            ways: config.ways,
        }
    }
}

impl GeometryHint {
    /// Working-set size in bytes for a stress level, at least one block.
    #[inline]
    fn working_set_bytes(&self, stress: StressLevel) -> u32 {
        let bytes = (f64::from(self.cache_bytes) * stress.working_set_ratio()) as u32;
        bytes.max(self.block_bytes)
    }

    /// Working-set size in whole blocks, at least one.
    #[inline]
    fn working_set_blocks(&self, stress: StressLevel) -> u32 {
        (self.working_set_bytes(stress) / self.block_bytes).max(1)
    }

    /// Aligns an address down to its block base.
    #[inline]
    fn align(&self, address: u32) -> u32 {
        address & !(self.block_bytes - 1)
    }
}

/// Sequential scan with a configurable stride.
///
/// Strides are at least a quarter block, so consecutive accesses share a
/// block a few times before moving on. The friendliest pattern for any
/// geometry. Roughly a quarter of the accesses are writes.
///
/// # Arguments
///
/// * `base` - Starting address (aligned down to a block).
/// * `count` - Number of accesses to produce.
/// * `stride` - Requested stride in bytes; clamped up to `block_bytes / 4`.
/// * `hint` - Geometry to calibrate against.
/// * `rng` - Seeded random source for the write mix.
pub fn sequential(
    base: u32,
    count: usize,
    stride: u32,
    hint: &GeometryHint,
    rng: &mut fastrand::Rng,
) -> Vec<Access> {
    let stride = stride.max(hint.block_bytes / 4).max(1);
    let base = hint.align(base);
    (0..count)
        .map(|i| Access {
            address: base.wrapping_add((i as u32).wrapping_mul(stride)),
            is_write: rng.f64() < 0.25,
        })
        .collect()
}

/// Uniform random block-aligned accesses within the working set.
///
/// Roughly 30% of the accesses are writes.
pub fn random(
    base: u32,
    count: usize,
    hint: &GeometryHint,
    stress: StressLevel,
    rng: &mut fastrand::Rng,
) -> Vec<Access> {
    let blocks = hint.working_set_blocks(stress);
    let base = hint.align(base);
    (0..count)
        .map(|_| Access {
            address: base.wrapping_add(rng.u32(0..blocks).wrapping_mul(hint.block_bytes)),
            is_write: rng.f64() < 0.30,
        })
        .collect()
}

/// Fixed-stride sweep sized against the set span.
///
/// The stride is `num_sets * block_bytes` scaled by the stress multiplier, so
/// heavier levels skip whole set spans and pile onto few sets. Read-only.
pub fn strided(base: u32, count: usize, hint: &GeometryHint, stress: StressLevel) -> Vec<Access> {
    let set_bytes = hint.num_sets * hint.block_bytes;
    let stride =
        ((f64::from(set_bytes) * stress.stride_multiplier()) as u32).max(hint.block_bytes);
    let base = hint.align(base);
    (0..count)
        .map(|i| Access::read(base.wrapping_add((i as u32).wrapping_mul(stride))))
        .collect()
}

/// Hot/cold reuse pattern separating recency from frequency.
///
/// Each round walks a small hot region with a linear frequency gradient
/// (lower indices repeated more often), then sweeps a disjoint cold region
/// once. Frequency-aware policies keep the hot head resident through the
/// sweep; recency-only policies lose it. Read-only.
pub fn temporal(base: u32, count: usize, hint: &GeometryHint, stress: StressLevel) -> Vec<Access> {
    let ws = hint.working_set_bytes(stress);
    let (hot_ratio, cold_ratio) = stress.hot_cold_ratios();
    let hot_blocks = (((f64::from(ws) * hot_ratio) as u32) / hint.block_bytes).max(1);
    let cold_blocks = (((f64::from(ws) * cold_ratio) as u32) / hint.block_bytes).max(1);
    let hot_base = hint.align(base);
    let cold_base = hot_base.wrapping_add(hot_blocks.wrapping_mul(hint.block_bytes));

    // One full round: gradient over the hot region, then the cold sweep.
    let mut round = Vec::new();
    for i in 0..hot_blocks {
        let repeats = 1 + (hot_blocks - 1 - i) * 2 / hot_blocks;
        for _ in 0..repeats {
            round.push(hot_base.wrapping_add(i.wrapping_mul(hint.block_bytes)));
        }
    }
    for j in 0..cold_blocks {
        round.push(cold_base.wrapping_add(j.wrapping_mul(hint.block_bytes)));
    }

    (0..count)
        .map(|k| Access::read(round[k % round.len()]))
        .collect()
}

/// Cyclic walk over a window exactly one working set wide.
///
/// Roughly one access in eight is a write.
pub fn working_set(
    base: u32,
    count: usize,
    hint: &GeometryHint,
    stress: StressLevel,
    rng: &mut fastrand::Rng,
) -> Vec<Access> {
    let blocks = hint.working_set_blocks(stress);
    let base = hint.align(base);
    (0..count)
        .map(|i| Access {
            address: base.wrapping_add(((i as u32) % blocks).wrapping_mul(hint.block_bytes)),
            is_write: rng.f64() < 0.125,
        })
        .collect()
}

/// Cyclic walk over a window deliberately larger than the cache.
///
/// With the loop window exceeding capacity, every block is evicted before
/// its next reuse under LRU-like policies. Read-only.
pub fn thrashing(base: u32, count: usize, hint: &GeometryHint, stress: StressLevel) -> Vec<Access> {
    let window = (f64::from(hint.cache_bytes) * stress.thrash_factor()) as u32;
    let blocks = (window / hint.block_bytes).max(1);
    let base = hint.align(base);
    (0..count)
        .map(|i| Access::read(base.wrapping_add(((i as u32) % blocks).wrapping_mul(hint.block_bytes))))
        .collect()
}

/// Conflict storm: distinct tags all landing in one set.
///
/// Addresses are spaced 1 MiB apart, which aliases to the same set index in
/// any cache up to 1 MiB. Cycling through one more tag than the targeted
/// associativity guarantees every access evicts the block needed next under
/// LRU. Read-only.
pub fn lru_killer(base: u32, count: usize, hint: &GeometryHint, stress: StressLevel) -> Vec<Access> {
    let tags = stress.conflict_ways() + 1;
    let base = hint.align(base);
    (0..count)
        .map(|i| Access::read(base.wrapping_add(((i as u32) % tags).wrapping_mul(CONFLICT_STRIDE))))
        .collect()
}

/// Zipf-distributed accesses over the working set.
///
/// Item `i` is drawn with weight `1 / i^skew` via inverse-CDF sampling; each
/// item is one block-aligned address. Roughly 20% of the accesses are writes.
pub fn zipfian(
    base: u32,
    count: usize,
    hint: &GeometryHint,
    stress: StressLevel,
    rng: &mut fastrand::Rng,
) -> Vec<Access> {
    let items = hint.working_set_blocks(stress) as usize;
    let skew = stress.zipf_skew();
    let mut cdf = Vec::with_capacity(items);
    let mut total = 0.0;
    for i in 0..items {
        total += 1.0 / ((i + 1) as f64).powf(skew);
        cdf.push(total);
    }
    let base = hint.align(base);
    (0..count)
        .map(|_| {
            let needle = rng.f64() * total;
            let item = cdf.partition_point(|&c| c < needle).min(items - 1);
            Access {
                address: base.wrapping_add((item as u32).wrapping_mul(hint.block_bytes)),
                is_write: rng.f64() < 0.20,
            }
        })
        .collect()
}

/// Forward scan followed by a reverse reuse of its tail.
///
/// Each phase scans the working set forward, then revisits the last quarter
/// in reverse. The tail is the freshest data on the way back, so
/// recency-based policies shine while FIFO pays full price. Read-only.
pub fn scan_reuse(base: u32, count: usize, hint: &GeometryHint, stress: StressLevel) -> Vec<Access> {
    let scan_blocks = hint.working_set_blocks(stress);
    let reuse_blocks = (scan_blocks / 4).max(1);
    let base = hint.align(base);

    let mut round = Vec::with_capacity((scan_blocks + reuse_blocks) as usize);
    for i in 0..scan_blocks {
        round.push(base.wrapping_add(i.wrapping_mul(hint.block_bytes)));
    }
    for i in (scan_blocks - reuse_blocks..scan_blocks).rev() {
        round.push(base.wrapping_add(i.wrapping_mul(hint.block_bytes)));
    }

    (0..count)
        .map(|k| Access::read(round[k % round.len()]))
        .collect()
}

/// The nine supported patterns, as a serializable selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TracePattern {
    /// Sequential scan with stride.
    Sequential,
    /// Uniform random within the working set.
    Random,
    /// Fixed-stride set-span sweep.
    Strided,
    /// Hot/cold frequency-gradient reuse.
    Temporal,
    /// Cyclic working-set walk.
    WorkingSet,
    /// Over-capacity cyclic walk.
    Thrashing,
    /// Single-set conflict storm.
    LruKiller,
    /// Zipf-distributed popularity.
    Zipfian,
    /// Forward scan with reverse tail reuse.
    ScanReuse,
}

/// Documentation record for one pattern at one stress level.
///
/// This is a descriptive contract for UIs and reports, not computed
/// semantics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratorInfo {
    /// Short pattern name.
    pub name: &'static str,
    /// Human description of the stream.
    pub description: &'static str,
    /// What the pattern is designed to exercise.
    pub exercises: &'static str,
    /// Qualitative behavior to expect from a healthy cache.
    pub expected_behavior: &'static str,
    /// Stress-level-specific tuning summary.
    pub tuning: String,
}

impl TracePattern {
    /// Short pattern name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Random => "random",
            Self::Strided => "strided",
            Self::Temporal => "temporal",
            Self::WorkingSet => "working-set",
            Self::Thrashing => "thrashing",
            Self::LruKiller => "lru-killer",
            Self::Zipfian => "zipfian",
            Self::ScanReuse => "scan-reuse",
        }
    }

    /// Builds the documentation record for this pattern at `stress`.
    pub fn info(self, stress: StressLevel) -> GeneratorInfo {
        let ratio = stress.working_set_ratio();
        match self {
            Self::Sequential => GeneratorInfo {
                name: self.name(),
                description: "Linear walk through memory with a fixed stride and a 25% write mix.",
                exercises: "Spatial locality and block-size amortization.",
                expected_behavior: "High hit rate once each block's first access has missed.",
                tuning: format!("stride at least block/4; working-set ratio {ratio:.1}x unused"),
            },
            Self::Random => GeneratorInfo {
                name: self.name(),
                description: "Uniform block-aligned addresses inside the working set, 30% writes.",
                exercises: "Capacity under no locality; eviction churn of every policy.",
                expected_behavior: "Hit rate tracks working-set-to-capacity ratio.",
                tuning: format!("working set {ratio:.1}x L1 capacity"),
            },
            Self::Strided => GeneratorInfo {
                name: self.name(),
                description: "Constant stride sized against the set span, read-only.",
                exercises: "Set-index aliasing and associativity pressure.",
                expected_behavior: "Hit rate collapses once the stride reaches the set span.",
                tuning: format!(
                    "stride = {:.2}x set span; working set {ratio:.1}x L1",
                    stress.stride_multiplier()
                ),
            },
            Self::Temporal => GeneratorInfo {
                name: self.name(),
                description:
                    "A small hot region re-read with a frequency gradient, then a cold sweep.",
                exercises: "Frequency retention versus recency retention (LFU against LRU).",
                expected_behavior:
                    "LFU keeps the hot head through the sweep; LRU reloads it every round.",
                tuning: format!(
                    "hot {:.0}% / cold {:.0}% of a {ratio:.1}x working set",
                    stress.hot_cold_ratios().0 * 100.0,
                    stress.hot_cold_ratios().1 * 100.0
                ),
            },
            Self::WorkingSet => GeneratorInfo {
                name: self.name(),
                description: "Cyclic walk over a fixed window, 12.5% writes.",
                exercises: "Capacity boundary behavior around the working-set knee.",
                expected_behavior: "Near-perfect hits below capacity, cliff above it.",
                tuning: format!("window = {ratio:.1}x L1 capacity"),
            },
            Self::Thrashing => GeneratorInfo {
                name: self.name(),
                description: "Read-only cyclic walk over a window larger than the cache.",
                exercises: "Worst-case reuse distance; eviction-before-reuse.",
                expected_behavior: "Hit rate near zero for LRU/FIFO; Random salvages a fraction.",
                tuning: format!("window = {:.1}x L1 capacity", stress.thrash_factor()),
            },
            Self::LruKiller => GeneratorInfo {
                name: self.name(),
                description: "Distinct tags 1 MiB apart cycling through one set.",
                exercises: "Associativity exhaustion with adversarial reuse order.",
                expected_behavior:
                    "Zero hits under LRU at or below the targeted associativity; Random survives.",
                tuning: format!(
                    "cycles {} tags against {}-way sets",
                    stress.conflict_ways() + 1,
                    stress.conflict_ways()
                ),
            },
            Self::Zipfian => GeneratorInfo {
                name: self.name(),
                description: "Popularity-skewed draws over the working set, 20% writes.",
                exercises: "Realistic hot-head retention under long-tail traffic.",
                expected_behavior: "Hit rate well above uniform random at the same footprint.",
                tuning: format!(
                    "skew {:.1} over a {ratio:.1}x working set",
                    stress.zipf_skew()
                ),
            },
            Self::ScanReuse => GeneratorInfo {
                name: self.name(),
                description: "Forward scan, then reverse reuse of the freshest tail, read-only.",
                exercises: "Recency exploitation; separates LRU from FIFO.",
                expected_behavior: "LRU hits the whole reused tail; FIFO misses most of it.",
                tuning: format!("reuses the last quarter of a {ratio:.1}x scan"),
            },
        }
    }
}

/// A serializable request for one generated trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorRequest {
    /// Which pattern to produce.
    pub pattern: TracePattern,
    /// Starting address.
    #[serde(default)]
    pub base_address: u32,
    /// Number of accesses.
    pub count: usize,
    /// Requested stride in bytes (sequential pattern only).
    #[serde(default)]
    pub stride: u32,
    /// Geometry to calibrate against.
    #[serde(default)]
    pub hint: GeometryHint,
    /// Stress level.
    #[serde(default)]
    pub stress: StressLevel,
}

/// Produces the trace described by `request`.
///
/// Deterministic patterns ignore `rng`; stochastic ones draw every sample
/// from it, so a fixed seed reproduces the stream exactly.
pub fn generate(request: &GeneratorRequest, rng: &mut fastrand::Rng) -> Vec<Access> {
    let GeneratorRequest {
        pattern,
        base_address,
        count,
        stride,
        hint,
        stress,
    } = *request;
    match pattern {
        TracePattern::Sequential => sequential(base_address, count, stride, &hint, rng),
        TracePattern::Random => random(base_address, count, &hint, stress, rng),
        TracePattern::Strided => strided(base_address, count, &hint, stress),
        TracePattern::Temporal => temporal(base_address, count, &hint, stress),
        TracePattern::WorkingSet => working_set(base_address, count, &hint, stress, rng),
        TracePattern::Thrashing => thrashing(base_address, count, &hint, stress),
        TracePattern::LruKiller => lru_killer(base_address, count, &hint, stress),
        TracePattern::Zipfian => zipfian(base_address, count, &hint, stress, rng),
        TracePattern::ScanReuse => scan_reuse(base_address, count, &hint, stress),
    }
}
