//! The poll loop: fetch, check, report, sleep, repeat.
//!
//! ```text
//! Poller::run
//!   └── every poll_interval
//!       ├── StatsFetcher::fetch()
//!       ├── ok  → FailureTracker::record_success, check()
//!       └── err → FailureTracker::record_failure, diagnostic line,
//!                 "stats unavailable" notice once the threshold is reached
//! ```
//!
//! The unavailable notice is level-triggered: it is printed on every failed
//! cycle for as long as the consecutive-failure count stays at or above the
//! threshold.

use std::io::{Stderr, Stdout, Write};
use std::time::Duration;

use statwatch_core::stats::StatsRecord;
use statwatch_core::thresholds::{self, ThresholdViolation};

use crate::config::ProbeConfig;
use crate::console::Console;
use crate::fetcher::StatsFetcher;

// ---------------------------------------------------------------------------
// FailureTracker
// ---------------------------------------------------------------------------

/// Counts consecutive failed polls.
#[derive(Debug)]
pub struct FailureTracker {
    consecutive_failures: u32,
    threshold: u32,
}

impl FailureTracker {
    pub fn new(threshold: u32) -> Self {
        Self {
            consecutive_failures: 0,
            threshold,
        }
    }

    /// Count a failed poll and return its position in the current run of failures.
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures
    }

    /// A successful poll ends the run of failures.
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Whether enough polls in a row have failed to call the stats unavailable.
    pub fn is_exhausted(&self) -> bool {
        self.consecutive_failures >= self.threshold
    }
}

// ---------------------------------------------------------------------------
// Threshold check
// ---------------------------------------------------------------------------

/// Evaluate `record` and print one warning line per broken rule.
///
/// Returns the violations that were printed.
pub fn check<O: Write, E: Write>(
    record: &StatsRecord,
    console: &mut Console<O, E>,
) -> Vec<ThresholdViolation> {
    let violations = thresholds::evaluate(record);
    for violation in &violations {
        console.report_violation(violation);
    }
    violations
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

/// What a single poll cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Stats were fetched and checked; `violations` were printed.
    Checked { violations: Vec<ThresholdViolation> },
    /// The fetch failed; `attempt` is the consecutive-failure count.
    Failed { attempt: u32 },
    /// The fetch failed and the failure threshold is reached, so the
    /// unavailable notice was printed as well.
    Unavailable { attempt: u32 },
}

/// Drives the fetch/check cycle for one stats endpoint.
pub struct Poller<O = Stdout, E = Stderr> {
    fetcher: StatsFetcher,
    failures: FailureTracker,
    console: Console<O, E>,
    interval: Duration,
}

impl Poller {
    /// Build a poller that talks to `config.stats_url` and prints to stdio.
    pub fn from_config(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let fetcher = StatsFetcher::new(config.stats_url.clone(), config.request_timeout)?;
        Ok(Self::new(fetcher, Console::stdio(), config))
    }
}

impl<O: Write, E: Write> Poller<O, E> {
    pub fn new(fetcher: StatsFetcher, console: Console<O, E>, config: &ProbeConfig) -> Self {
        Self {
            fetcher,
            failures: FailureTracker::new(config.max_consecutive_failures),
            console,
            interval: config.poll_interval,
        }
    }

    /// Run the poll loop indefinitely.
    ///
    /// Never returns under normal operation; the process is stopped from
    /// outside. There is no backoff: a failed cycle waits the same interval
    /// as a successful one.
    pub async fn run(mut self) {
        loop {
            self.poll_once().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Execute one fetch/check cycle without sleeping.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.fetcher.fetch().await {
            Ok(record) => {
                if self.failures.consecutive_failures() > 0 {
                    tracing::info!(
                        failures = self.failures.consecutive_failures(),
                        "Stats endpoint recovered",
                    );
                }
                self.failures.record_success();

                let violations = check(&record, &mut self.console);
                tracing::debug!(
                    load_average = record.load_average,
                    violations = violations.len(),
                    "Stats checked",
                );
                CycleOutcome::Checked { violations }
            }
            Err(e) => {
                let attempt = self.failures.record_failure();
                self.console.report_failure(attempt, &e);
                tracing::debug!(attempt, error = %e, "Stats poll failed");

                if !self.failures.is_exhausted() {
                    return CycleOutcome::Failed { attempt };
                }

                if attempt == self.failures.threshold() {
                    tracing::warn!(
                        url = %self.fetcher.url(),
                        failures = attempt,
                        "Stats endpoint unavailable",
                    );
                }
                self.console.report_unavailable();
                CycleOutcome::Unavailable { attempt }
            }
        }
    }

    /// Consume the poller and return its console (used to inspect captured output).
    pub fn into_console(self) -> Console<O, E> {
        self.console
    }
}
