#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use statwatch_agent::config::ProbeConfig;
use statwatch_agent::console::Console;
use statwatch_agent::fetcher::StatsFetcher;
use statwatch_agent::poller::Poller;

pub const STATS_PATH: &str = "/_stats";

/// Poller writing into in-memory buffers.
pub type CapturedPoller = Poller<Vec<u8>, Vec<u8>>;

/// Probe config pointing at `url` with short test timings.
pub fn test_config(url: &str) -> ProbeConfig {
    ProbeConfig {
        stats_url: url.to_string(),
        poll_interval: Duration::from_millis(20),
        request_timeout: Duration::from_secs(2),
        max_consecutive_failures: 3,
    }
}

/// Build a poller for `url` that captures stdout/stderr.
pub fn captured_poller(url: &str) -> CapturedPoller {
    let config = test_config(url);
    let fetcher = StatsFetcher::new(config.stats_url.clone(), config.request_timeout)
        .expect("client should build");
    Poller::new(fetcher, Console::new(Vec::new(), Vec::new()), &config)
}

/// Split a finished poller into its captured (stdout, stderr) text.
pub fn captured_output(poller: CapturedPoller) -> (String, String) {
    let (out, err) = poller.into_console().into_parts();
    (
        String::from_utf8(out).expect("stdout is utf-8"),
        String::from_utf8(err).expect("stderr is utf-8"),
    )
}

/// Serve `router` on an ephemeral loopback port and return the stats URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}{STATS_PATH}")
}

/// Endpoint that always answers with `status` and `body`.
pub async fn spawn_stats_server(status: StatusCode, body: &'static str) -> String {
    let router = Router::new().route(STATS_PATH, get(move || async move { (status, body) }));
    serve(router).await
}

/// Endpoint that waits `delay` before answering.
pub async fn spawn_slow_server(delay: Duration) -> String {
    let router = Router::new().route(
        STATS_PATH,
        get(move || async move {
            tokio::time::sleep(delay).await;
            "5.0,1000,100,1000,100,1000,100"
        }),
    );
    serve(router).await
}

/// Shared state for [`spawn_flaky_server`].
pub struct Flaky {
    hits: AtomicUsize,
    failures: usize,
    body: &'static str,
}

impl Flaky {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn flaky_stats(State(flaky): State<Arc<Flaky>>) -> (StatusCode, &'static str) {
    let hit = flaky.hits.fetch_add(1, Ordering::SeqCst);
    if hit < flaky.failures {
        (StatusCode::SERVICE_UNAVAILABLE, "down")
    } else {
        (StatusCode::OK, flaky.body)
    }
}

/// Endpoint that answers 503 for the first `failures` requests, then `body`.
pub async fn spawn_flaky_server(failures: usize, body: &'static str) -> (String, Arc<Flaky>) {
    let flaky = Arc::new(Flaky {
        hits: AtomicUsize::new(0),
        failures,
        body,
    });
    let router = Router::new()
        .route(STATS_PATH, get(flaky_stats))
        .with_state(Arc::clone(&flaky));
    (serve(router).await, flaky)
}

/// Raw endpoint that promises a longer body than it sends, then hangs up.
pub async fn spawn_truncated_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\n5.0,1000")
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}{STATS_PATH}")
}

/// URL of a loopback port with nothing listening.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{STATS_PATH}")
}
