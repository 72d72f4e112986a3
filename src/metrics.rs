//! Typed view of the collected counters and the derived statistics.
//!
//! The parser produces a string-keyed map; [`MemoryMetrics::from_raw`]
//! resolves every counter the report needs exactly once, so a counter the
//! OS stopped reporting surfaces as a single [`MetricsError::MissingMetric`]
//! instead of a lookup failure at print time. The record is immutable after
//! construction.

use std::collections::HashMap;
use std::fmt;

use crate::error::{MetricsError, Result};
use crate::parser::PRESSURE_LEVEL_PARAM;

/// Memory pressure classification reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureLevel {
    Normal,
    Warn,
    Critical,
}

impl PressureLevel {
    /// Map the raw `kern.memorystatus_vm_pressure_level` value.
    pub fn from_raw(raw: u64) -> Result<Self> {
        match raw {
            1 => Ok(PressureLevel::Normal),
            2 => Ok(PressureLevel::Warn),
            3 => Ok(PressureLevel::Critical),
            other => Err(MetricsError::UnknownPressureLevel(other)),
        }
    }
}

impl fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PressureLevel::Normal => "Normal",
            PressureLevel::Warn => "Warn",
            PressureLevel::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Validated memory counters. All sizes are in bytes.
#[derive(Debug, Clone)]
pub struct MemoryMetrics {
    /// Pages recently referenced and kept resident
    pub active: u64,
    /// Resident pages not referenced recently
    pub inactive: u64,
    /// Pages on the free list
    pub free: u64,
    /// Pages locked in memory, never paged out
    pub wired: u64,
    /// Pages held back by the pager
    pub throttled: u64,
    /// Pages speculatively mapped ahead of demand
    pub speculative: u64,
    /// Physical pages occupied by the compressor
    pub compressor_occupied: u64,
    /// Uncompressed size of what the compressor holds
    pub compressor_stored: u64,
    /// Anonymous (swap-backed) pages
    pub anonymous: u64,
    /// Pages reclaimable without write-back
    pub purgeable: u64,
    /// File-backed pages
    pub file_backed: u64,
    /// Dirty pages holding app data and memory mapped files
    pub dirty_internal: u64,
    /// Dirty pages holding file data
    pub dirty_external: u64,
    /// Swap file capacity
    pub swap_total: u64,
    /// Swap in use
    pub swap_used: u64,
    /// Swap still available
    pub swap_free: u64,
    /// Kernel pressure classification
    pub pressure_level: PressureLevel,
    /// Free memory percentage reported by `vmmetrics` (0-100)
    pub free_percent: u64,
}

impl MemoryMetrics {
    /// Validate the raw metrics map into a typed record.
    pub fn from_raw(raw: &HashMap<String, u64>) -> Result<Self> {
        let lookup = |name: &str| -> Result<u64> {
            raw.get(name)
                .copied()
                .ok_or_else(|| MetricsError::MissingMetric(name.to_string()))
        };

        Ok(MemoryMetrics {
            active: lookup("Pages active")?,
            inactive: lookup("Pages inactive")?,
            free: lookup("Pages free")?,
            wired: lookup("Pages wired down")?,
            throttled: lookup("Pages throttled")?,
            speculative: lookup("Pages speculative")?,
            compressor_occupied: lookup("Pages occupied by compressor")?,
            compressor_stored: lookup("Pages stored in compressor")?,
            anonymous: lookup("Anonymous pages")?,
            purgeable: lookup("Pages purgeable")?,
            file_backed: lookup("File-backed pages")?,
            dirty_internal: lookup("vm.pageout_inactive_dirty_internal")?,
            dirty_external: lookup("vm.pageout_inactive_dirty_external")?,
            swap_total: lookup("Swap total")?,
            swap_used: lookup("Swap used")?,
            swap_free: lookup("Swap free")?,
            pressure_level: PressureLevel::from_raw(lookup(PRESSURE_LEVEL_PARAM)?)?,
            free_percent: lookup("Free memory percent")?,
        })
    }

    /// Sum of every physical-memory bucket.
    pub fn total_physical(&self) -> u64 {
        self.active
            + self.inactive
            + self.free
            + self.wired
            + self.throttled
            + self.speculative
            + self.compressor_occupied
    }

    /// Bytes the compressor keeps out of physical memory. Right after a
    /// purge the occupied size can exceed the stored size, so the savings
    /// clamp at zero.
    pub fn compressor_savings(&self) -> u64 {
        self.compressor_stored.saturating_sub(self.compressor_occupied)
    }

    /// Anonymous memory minus its purgeable portion, which backs caches
    /// rather than app data.
    pub fn application_memory(&self) -> u64 {
        self.anonymous.saturating_sub(self.purgeable)
    }

    /// File-backed pages plus purgeable pages.
    pub fn cached_files(&self) -> u64 {
        self.file_backed + self.purgeable
    }

    /// The "used" figure `top` reports: everything resident except free and
    /// speculative pages.
    pub fn top_used(&self) -> u64 {
        self.active + self.inactive + self.wired + self.throttled + self.compressor_occupied
    }

    /// Modified pages not yet written back, app data and file data combined.
    pub fn dirty_total(&self) -> u64 {
        self.dirty_internal + self.dirty_external
    }

    /// Memory the OS considers available, floor of
    /// `total_physical * free_percent / 100`.
    pub fn available_memory(&self) -> u64 {
        self.total_physical() * self.free_percent / 100
    }

    /// Inverse of the kernel's free-memory percentage.
    pub fn pressure_percent(&self) -> u64 {
        100u64.saturating_sub(self.free_percent)
    }
}
