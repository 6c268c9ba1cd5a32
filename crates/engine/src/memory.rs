//! Main Memory Model.
//!
//! This module models main memory as a scalar-latency device with a burst
//! transfer correction. It provides the following:
//! 1. **Latency:** Base cycles plus the bus cycles needed to move one transfer.
//! 2. **Heat Map:** Sixteen regions spanning the observed address range, with
//!    per-region read/write counters recomputed as the range grows.
//! 3. **Bandwidth:** Peak and effective figures derived from the bus geometry
//!    and the bytes actually moved.
//! 4. **History:** A bounded rolling log of recent accesses for visualization.
//!
//! There is no row-buffer or bank modeling; the device is a flat latency
//! with a throughput bound.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::common::constants::{MEMORY_HISTORY_CAPACITY, MEMORY_REGION_COUNT};
use crate::config::MemoryConfig;

/// One heat-map region over the observed address range.
///
/// Boundaries are recomputed on every access as the observed minimum and
/// maximum move, so counters describe region *indices*, which only line up
/// with the reported boundaries in the snapshot taken after an access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    /// First byte address covered by the region.
    pub start_address: u64,
    /// Last byte address covered by the region.
    pub end_address: u64,
    /// Total accesses landing in the region.
    pub access_count: u64,
    /// Read accesses landing in the region.
    pub read_count: u64,
    /// Write accesses landing in the region.
    pub write_count: u64,
    /// Memory cycle counter value at the most recent access.
    pub last_access_time: u64,
}

/// Aggregate figures for the memory device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Read accesses served.
    pub total_reads: u64,
    /// Write accesses served.
    pub total_writes: u64,
    /// All accesses served.
    pub total_accesses: u64,
    /// Bytes moved over the bus, including burst padding.
    pub bytes_transferred: u64,
    /// Running mean access latency in cycles.
    pub average_latency: f64,
    /// Effective bandwidth as a percentage of peak.
    pub bandwidth_utilization_pct: f64,
    /// Theoretical peak bandwidth from the bus geometry.
    pub peak_bandwidth_mb_s: f64,
    /// Achieved bandwidth over the busy cycles so far.
    pub effective_bandwidth_mb_s: f64,
}

/// Outcome of one memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryAccessResult {
    /// Address after wrapping into the physical capacity.
    pub address: u64,
    /// Whether the access was a write.
    pub is_write: bool,
    /// Cycles consumed: base latency plus burst transfer cycles.
    pub latency_cycles: u64,
    /// Bytes moved for this access.
    pub bytes_transferred: u64,
}

/// One entry of the rolling access history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Wrapped address of the access.
    pub address: u64,
    /// Whether the access was a write.
    pub is_write: bool,
    /// Cycles the access consumed.
    pub latency_cycles: u64,
    /// Memory cycle counter value when the access arrived.
    pub at_cycle: u64,
}

/// Scalar-latency main memory with burst transfer costing and a heat map.
#[derive(Debug)]
pub struct MainMemory {
    config: MemoryConfig,
    size_bytes: u64,
    bus_bytes: u64,
    regions: [MemoryRegion; MEMORY_REGION_COUNT],
    /// Observed (min, max) wrapped addresses, present after the first access.
    observed: Option<(u64, u64)>,
    total_reads: u64,
    total_writes: u64,
    bytes_transferred: u64,
    average_latency: f64,
    /// Cumulative latency of all accesses; the denominator for effective bandwidth.
    busy_cycles: u64,
    /// Advances once per access; stamps regions and history entries.
    clock: u64,
    history: VecDeque<HistoryEntry>,
}

impl MainMemory {
    /// Creates a memory device from a configuration.
    ///
    /// Zero-valued bus width, burst length, or capacity fall back to the
    /// configuration defaults so the model stays total.
    pub fn new(config: MemoryConfig) -> Self {
        let safe = MemoryConfig {
            size_mb: if config.size_mb == 0 { MemoryConfig::default().size_mb } else { config.size_mb },
            bus_width_bits: if config.bus_width_bits == 0 {
                MemoryConfig::default().bus_width_bits
            } else {
                config.bus_width_bits
            },
            burst_length: if config.burst_length == 0 {
                MemoryConfig::default().burst_length
            } else {
                config.burst_length
            },
            ..config
        };
        Self {
            size_bytes: u64::from(safe.size_mb) * 1024 * 1024,
            bus_bytes: u64::from(safe.bus_width_bits / 8),
            config: safe,
            regions: [MemoryRegion::default(); MEMORY_REGION_COUNT],
            observed: None,
            total_reads: 0,
            total_writes: 0,
            bytes_transferred: 0,
            average_latency: 0.0,
            busy_cycles: 0,
            clock: 0,
            history: VecDeque::with_capacity(MEMORY_HISTORY_CAPACITY),
        }
    }

    /// Serves one access and returns its cost.
    ///
    /// The address is wrapped modulo the physical capacity, so out-of-range
    /// accesses are impossible by construction. The transfer moves
    /// `max(block_bytes, bus_bytes * burst_length)` bytes and costs the base
    /// latency plus one cycle per bus-width beat.
    ///
    /// # Arguments
    ///
    /// * `address` - Address requested by the hierarchy.
    /// * `is_write` - Whether the access is a write.
    /// * `block_bytes` - Cache block size governing the transfer.
    ///
    /// # Returns
    ///
    /// The wrapped address, latency, and bytes moved.
    pub fn access(&mut self, address: u32, is_write: bool, block_bytes: u32) -> MemoryAccessResult {
        self.clock += 1;
        let wrapped = u64::from(address) % self.size_bytes;

        self.track_region(wrapped, is_write);

        let transfer = u64::from(block_bytes).max(self.bus_bytes * u64::from(self.config.burst_length));
        let latency = self.config.latency_cycles + transfer.div_ceil(self.bus_bytes);

        if is_write {
            self.total_writes += 1;
        } else {
            self.total_reads += 1;
        }
        self.bytes_transferred += transfer;
        self.busy_cycles += latency;

        // Single-pass running mean over memory accesses only.
        let n = self.total_reads + self.total_writes;
        self.average_latency += (latency as f64 - self.average_latency) / n as f64;

        if self.history.len() == MEMORY_HISTORY_CAPACITY {
            let _ = self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            address: wrapped,
            is_write,
            latency_cycles: latency,
            at_cycle: self.clock,
        });

        MemoryAccessResult {
            address: wrapped,
            is_write,
            latency_cycles: latency,
            bytes_transferred: transfer,
        }
    }

    /// Grows the observed range, recomputes region boundaries, and bumps the
    /// counters of the region containing `wrapped`.
    fn track_region(&mut self, wrapped: u64, is_write: bool) {
        let (min_seen, max_seen) = match self.observed {
            Some((lo, hi)) => (lo.min(wrapped), hi.max(wrapped)),
            None => (wrapped, wrapped),
        };
        self.observed = Some((min_seen, max_seen));

        let span = max_seen - min_seen + 1;
        let region_size = span.div_ceil(MEMORY_REGION_COUNT as u64).max(1);
        for (i, region) in self.regions.iter_mut().enumerate() {
            region.start_address = min_seen + i as u64 * region_size;
            region.end_address = min_seen + (i as u64 + 1) * region_size - 1;
        }

        let index = ((wrapped - min_seen) / region_size).min(MEMORY_REGION_COUNT as u64 - 1);
        let region = &mut self.regions[index as usize];
        region.access_count += 1;
        if is_write {
            region.write_count += 1;
        } else {
            region.read_count += 1;
        }
        region.last_access_time = self.clock;
    }

    /// Returns a snapshot of the aggregate figures.
    ///
    /// Bandwidth figures are derived at read time from the counters, so they
    /// are always consistent with the accesses served so far.
    pub fn stats(&self) -> MemoryStats {
        let peak = self.peak_bandwidth_mb_s();
        let effective = if self.busy_cycles == 0 {
            0.0
        } else {
            (self.bytes_transferred as f64 / self.busy_cycles as f64)
                * f64::from(self.config.frequency_mhz)
        };
        let utilization = if peak > 0.0 { 100.0 * effective / peak } else { 0.0 };
        MemoryStats {
            total_reads: self.total_reads,
            total_writes: self.total_writes,
            total_accesses: self.total_reads + self.total_writes,
            bytes_transferred: self.bytes_transferred,
            average_latency: self.average_latency,
            bandwidth_utilization_pct: utilization,
            peak_bandwidth_mb_s: peak,
            effective_bandwidth_mb_s: effective,
        }
    }

    /// Theoretical peak bandwidth from bus width, clock, and data rate.
    #[inline]
    fn peak_bandwidth_mb_s(&self) -> f64 {
        f64::from(self.config.bus_width_bits)
            * f64::from(self.config.frequency_mhz)
            * f64::from(self.config.memory_type.data_rate())
            / 8000.0
    }

    /// Returns a deep copy of the sixteen heat-map regions.
    pub fn regions(&self) -> Vec<MemoryRegion> {
        self.regions.to_vec()
    }

    /// Returns a deep copy of the rolling access history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.iter().copied().collect()
    }

    /// The configuration this memory was built from (after zero-field repair).
    #[inline]
    pub const fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Cumulative latency of all accesses served so far.
    #[inline]
    pub const fn busy_cycles(&self) -> u64 {
        self.busy_cycles
    }

    /// Restores the construction-time state.
    ///
    /// Clears statistics, history, and the observed range; regions return to
    /// zeroed counters and zeroed boundaries, so a fresh memory reports empty
    /// regions.
    pub fn reset(&mut self) {
        self.regions = [MemoryRegion::default(); MEMORY_REGION_COUNT];
        self.observed = None;
        self.total_reads = 0;
        self.total_writes = 0;
        self.bytes_transferred = 0;
        self.average_latency = 0.0;
        self.busy_cycles = 0;
        self.clock = 0;
        self.history.clear();
    }
}
