use std::time::Duration;

use statwatch_core::constants::{
    MAX_CONSECUTIVE_FAILURES, POLL_INTERVAL, REQUEST_TIMEOUT, STATS_URL,
};

/// Runtime parameters for the probe.
///
/// The binary always runs with [`ProbeConfig::default`], which carries the
/// fixed values from [`statwatch_core::constants`]. Tests build their own
/// to point the probe at a local endpoint with shorter timings.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// URL of the stats endpoint.
    pub stats_url: String,
    /// Sleep between poll cycles.
    pub poll_interval: Duration,
    /// Total timeout for one stats request.
    pub request_timeout: Duration,
    /// Consecutive failures before the "stats unavailable" notice is shown.
    pub max_consecutive_failures: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            stats_url: STATS_URL.to_string(),
            poll_interval: POLL_INTERVAL,
            request_timeout: REQUEST_TIMEOUT,
            max_consecutive_failures: MAX_CONSECUTIVE_FAILURES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_fixed_probe_parameters() {
        let config = ProbeConfig::default();
        assert_eq!(config.stats_url, "http://srv.msk01.gigacorp.local/_stats");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_consecutive_failures, 3);
    }
}
