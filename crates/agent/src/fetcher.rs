//! HTTP retrieval of the remote stats line.
//!
//! [`StatsFetcher`] wraps a single [`reqwest::Client`] (reused across poll
//! cycles for connection pooling) and turns one `GET` into a parsed
//! [`StatsRecord`].

use std::time::Duration;

use reqwest::StatusCode;
use statwatch_core::error::ParseError;
use statwatch_core::stats::{parse_stats, StatsRecord};

/// Errors from a single fetch-and-parse attempt.
///
/// Every variant is recoverable: the poller reports it and tries again on
/// the next cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not complete (DNS, connect, timeout, etc.).
    #[error("HTTP GET failed")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with something other than `200 OK`.
    #[error("unexpected HTTP status: {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body stream failed part-way.
    #[error("failed to read response body")]
    Read(#[source] reqwest::Error),

    /// The body arrived but is not a valid stats line.
    #[error(transparent)]
    Malformed(#[from] ParseError),
}

/// HTTP client bound to one stats endpoint.
pub struct StatsFetcher {
    client: reqwest::Client,
    url: String,
}

impl StatsFetcher {
    /// Build a fetcher for `url` whose requests give up after `timeout`.
    ///
    /// The timeout covers the whole request: connect, headers and body.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Create a fetcher reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The endpoint this fetcher polls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse one stats reading.
    pub async fn fetch(&self) -> Result<StatsRecord, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Read)?;
        let record = parse_stats(&String::from_utf8_lossy(&body))?;

        tracing::debug!(url = %self.url, bytes = body.len(), "Fetched stats");
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
