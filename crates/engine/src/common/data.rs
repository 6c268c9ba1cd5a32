//! Trace Access Records.
//!
//! This module defines the unit of a memory trace. Every component of the
//! engine consumes accesses in this form:
//! 1. **Replay:** Caches and hierarchies process one `Access` at a time.
//! 2. **Generation:** Pattern generators produce `Vec<Access>` streams.
//! 3. **Parsing:** The trace text loader emits `Access` per well-formed line.

use serde::{Deserialize, Serialize};

/// A single memory access: a 32-bit physical address plus a read/write marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    /// Physical byte address of the access.
    pub address: u32,
    /// `true` for a store, `false` for a load.
    pub is_write: bool,
}

impl Access {
    /// Creates a read access at `address`.
    #[inline]
    pub const fn read(address: u32) -> Self {
        Self {
            address,
            is_write: false,
        }
    }

    /// Creates a write access at `address`.
    #[inline]
    pub const fn write(address: u32) -> Self {
        Self {
            address,
            is_write: true,
        }
    }
}
