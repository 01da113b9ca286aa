//! Fixed probe parameters.
//!
//! The probe watches exactly one host on a fixed schedule; none of these
//! values are read from the environment.

use std::time::Duration;

/// Endpoint serving the comma-separated stats line.
pub const STATS_URL: &str = "http://srv.msk01.gigacorp.local/_stats";

/// Delay between the end of one poll cycle and the start of the next.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Total budget for a single stats request (connect + headers + body).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Consecutive failed polls after which the "stats unavailable" notice is shown.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Notice printed to stdout while the failure threshold is reached.
pub const STATS_UNAVAILABLE_NOTICE: &str = "Unable to fetch server statistic.";
