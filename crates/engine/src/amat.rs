//! Average Memory Access Time.
//!
//! Closed-form AMAT over measured hit rates. A level with zero accesses
//! contributes a miss rate of one: a cache that never filtered an access
//! cannot shorten the path below it.

/// AMAT for a single cache level in front of memory.
///
/// `hit_time + (1 - hit_rate) * miss_penalty`.
#[inline]
pub fn single_level(hit_time: f64, hit_rate: f64, miss_penalty: f64) -> f64 {
    hit_time + (1.0 - hit_rate) * miss_penalty
}

/// AMAT for an L1 + L2 hierarchy in front of memory.
///
/// The L2 term is itself the miss penalty of L1:
/// `l1_hit + (1 - l1_rate) * (l2_hit + (1 - l2_rate) * memory_penalty)`.
#[inline]
pub fn two_level(
    l1_hit_time: f64,
    l1_hit_rate: f64,
    l2_hit_time: f64,
    l2_hit_rate: f64,
    memory_penalty: f64,
) -> f64 {
    single_level(
        l1_hit_time,
        l1_hit_rate,
        single_level(l2_hit_time, l2_hit_rate, memory_penalty),
    )
}
