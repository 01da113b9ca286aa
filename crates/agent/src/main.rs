//! `statwatch-agent` -- remote host resource probe.
//!
//! Polls the stats endpoint every ten seconds, prints a warning line to
//! stdout for every resource threshold the host exceeds, and reports
//! failed polls on stderr. After three failed polls in a row it also
//! prints a "stats unavailable" notice on every further failed cycle.
//!
//! Probe parameters are fixed (see `statwatch_core::constants`). The only
//! environment input is `RUST_LOG`, which may also be set in a `.env` file,
//! to tune diagnostic tracing (written to stderr).

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statwatch_agent::config::ProbeConfig;
use statwatch_agent::poller::Poller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statwatch_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ProbeConfig::default();

    tracing::info!(
        url = %config.stats_url,
        interval_secs = config.poll_interval.as_secs(),
        timeout_secs = config.request_timeout.as_secs(),
        "Starting statwatch-agent",
    );

    let poller = Poller::from_config(&config).context("failed to build HTTP client")?;
    poller.run().await;

    Ok(())
}
