//! `statwatch-core` -- pure domain logic for the stats probe.
//!
//! Parsing of the remote stats line and threshold evaluation live here so
//! they can be tested without any network or runtime. The polling daemon
//! is in `statwatch-agent`.

pub mod constants;
pub mod error;
pub mod stats;
pub mod thresholds;
