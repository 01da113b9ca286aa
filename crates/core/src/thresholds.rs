//! Threshold evaluation for a single stats reading.
//!
//! Pure logic: takes a [`StatsRecord`] and returns the rules it breaks. The
//! agent decides where the resulting lines are printed.

use std::fmt;

use crate::stats::StatsRecord;

/// Load average above which a warning is raised.
pub const LOAD_AVERAGE_LIMIT: f64 = 30.0;

/// Fraction of memory in use above which a warning is raised.
pub const MEMORY_USAGE_LIMIT: f64 = 0.80;

/// Fraction of disk in use above which a warning is raised.
pub const DISK_USAGE_LIMIT: f64 = 0.90;

/// Fraction of network capacity in use above which a warning is raised.
pub const NETWORK_USAGE_LIMIT: f64 = 0.90;

const BYTES_PER_MIB: i64 = 1024 * 1024;
const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// A single broken threshold rule, carrying the figure to report.
///
/// `Display` renders the user-facing warning line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdViolation {
    /// Raw load average.
    LoadAverage { value: f64 },
    /// Memory in use, as a percentage of total.
    MemoryUsage { percent: f64 },
    /// Free disk space in mebibytes (truncated).
    LowDiskSpace { free_mib: i64 },
    /// Spare network bandwidth in megabits per second.
    NetworkSaturation { free_mbit_per_sec: f64 },
}

impl fmt::Display for ThresholdViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdViolation::LoadAverage { value } => {
                write!(f, "Load Average is too high: {value}")
            }
            ThresholdViolation::MemoryUsage { percent } => {
                write!(f, "Memory usage too high: {percent:.0}%")
            }
            ThresholdViolation::LowDiskSpace { free_mib } => {
                write!(f, "Free disk space is too low: {free_mib} Mb left")
            }
            ThresholdViolation::NetworkSaturation { free_mbit_per_sec } => {
                write!(
                    f,
                    "Network bandwidth usage high: {free_mbit_per_sec:.2} Mbit/s available"
                )
            }
        }
    }
}

/// Evaluate every rule against `record`.
///
/// All four rules are checked on each call; the result is in rule order
/// (load, memory, disk, network). A rule whose total is not positive is
/// skipped.
pub fn evaluate(record: &StatsRecord) -> Vec<ThresholdViolation> {
    let mut violations = Vec::new();

    if record.load_average > LOAD_AVERAGE_LIMIT {
        violations.push(ThresholdViolation::LoadAverage {
            value: record.load_average,
        });
    }

    if let Some(usage) = usage_ratio(record.used_memory, record.total_memory) {
        if usage > MEMORY_USAGE_LIMIT {
            violations.push(ThresholdViolation::MemoryUsage {
                percent: usage * 100.0,
            });
        }
    }

    if let Some(usage) = usage_ratio(record.used_disk, record.total_disk) {
        if usage > DISK_USAGE_LIMIT {
            violations.push(ThresholdViolation::LowDiskSpace {
                free_mib: (record.total_disk - record.used_disk) / BYTES_PER_MIB,
            });
        }
    }

    if let Some(usage) = usage_ratio(record.used_net_capacity, record.total_net_capacity) {
        if usage > NETWORK_USAGE_LIMIT {
            // Bytes/sec -> megabits/sec.
            let free_bytes = (record.total_net_capacity - record.used_net_capacity) as f64;
            violations.push(ThresholdViolation::NetworkSaturation {
                free_mbit_per_sec: free_bytes * 8.0 / BITS_PER_MEGABIT,
            });
        }
    }

    violations
}

/// `used / total`, or `None` when there is no positive total to divide by.
fn usage_ratio(used: i64, total: i64) -> Option<f64> {
    (total > 0).then(|| used as f64 / total as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
