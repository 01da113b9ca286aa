//! Stats record and the parser for the remote `_stats` line.
//!
//! The endpoint answers with a single line of seven comma-separated
//! numbers:
//!
//! ```text
//! <load average>,<total mem>,<used mem>,<total disk>,<used disk>,<total net>,<used net>
//! ```
//!
//! The first field is a float, the rest are signed 64-bit integers (bytes,
//! or bytes/sec for the network pair). Whitespace around the whole body and
//! around each field is ignored.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Number of fields in a well-formed stats line.
pub const FIELD_COUNT: usize = 7;

// ---------------------------------------------------------------------------
// StatsField
// ---------------------------------------------------------------------------

/// Positional fields of the stats line, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsField {
    LoadAverage,
    TotalMemory,
    UsedMemory,
    TotalDisk,
    UsedDisk,
    TotalNetwork,
    UsedNetwork,
}

impl StatsField {
    /// All fields in the order they appear on the wire.
    pub const ALL: [StatsField; FIELD_COUNT] = [
        StatsField::LoadAverage,
        StatsField::TotalMemory,
        StatsField::UsedMemory,
        StatsField::TotalDisk,
        StatsField::UsedDisk,
        StatsField::TotalNetwork,
        StatsField::UsedNetwork,
    ];

    /// Zero-based position of the field in the stats line.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            StatsField::LoadAverage => "Load Average",
            StatsField::TotalMemory => "Total Memory",
            StatsField::UsedMemory => "Used Memory",
            StatsField::TotalDisk => "Total Disk",
            StatsField::UsedDisk => "Used Disk",
            StatsField::TotalNetwork => "Total Network",
            StatsField::UsedNetwork => "Used Network",
        }
    }
}

impl fmt::Display for StatsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StatsRecord
// ---------------------------------------------------------------------------

/// One reading of the remote host's resource usage.
///
/// Only ever built from a complete, fully parsed stats line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsRecord {
    pub load_average: f64,
    /// Bytes.
    pub total_memory: i64,
    /// Bytes.
    pub used_memory: i64,
    /// Bytes.
    pub total_disk: i64,
    /// Bytes.
    pub used_disk: i64,
    /// Bytes per second.
    pub total_net_capacity: i64,
    /// Bytes per second.
    pub used_net_capacity: i64,
}

impl FromStr for StatsRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_stats(s)
    }
}

/// Parse a raw stats body into a [`StatsRecord`].
///
/// Fields are converted left to right and the first failure is returned;
/// later fields are never looked at.
pub fn parse_stats(body: &str) -> Result<StatsRecord, ParseError> {
    let parts: Vec<&str> = body.trim().split(',').collect();

    if parts.len() != FIELD_COUNT {
        return Err(ParseError::FieldCount {
            expected: FIELD_COUNT,
            actual: parts.len(),
        });
    }

    let int = |field: StatsField| parse_field::<i64>(field, parts[field.position()]);

    // Struct fields are evaluated in the order written, which keeps parsing left to right.
    Ok(StatsRecord {
        load_average: parse_field(StatsField::LoadAverage, parts[0])?,
        total_memory: int(StatsField::TotalMemory)?,
        used_memory: int(StatsField::UsedMemory)?,
        total_disk: int(StatsField::TotalDisk)?,
        used_disk: int(StatsField::UsedDisk)?,
        total_net_capacity: int(StatsField::TotalNetwork)?,
        used_net_capacity: int(StatsField::UsedNetwork)?,
    })
}

fn parse_field<T>(field: StatsField, raw: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = raw.trim();
    value.parse::<T>().map_err(|e| ParseError::InvalidField {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
