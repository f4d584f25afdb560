//! # Headliner
//!
//! Keeps a ranked snapshot of top stories from the Hacker News API fresh in
//! memory and serves it without making readers wait on the network.
//!
//! ## Architecture
//!
//! ```text
//! IdListFetcher → FanOutCollector → filter/rank/top-N → SnapshotStore → HTTP
//!                  (ItemFetcher × N)     (Pipeline)         ↑
//!                                                        Refresher
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Build one snapshot and print it
//! headliner fetch
//!
//! # Refresh every 20s and serve on :9060
//! headliner serve
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetchers,
/// pipeline and snapshot store from a [`Config`](config::Config).
pub mod app;

/// Command-line interface using clap.
///
/// - `serve` - Refresh in the background and serve over HTTP
/// - `fetch` - Build one snapshot and print it
pub mod cli;

/// Configuration loaded from `~/.config/headliner/config.toml`.
pub mod config;

/// Core domain models: [`Item`](domain::Item) and [`Snapshot`](domain::Snapshot).
pub mod domain;

/// Upstream access.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single GET
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ItemFetcher`](fetcher::ItemFetcher): One item, with bounded retries
/// - [`IdListFetcher`](fetcher::IdListFetcher): The candidate id list
/// - [`FanOutCollector`](fetcher::FanOutCollector): Concurrent fetching with semaphore
pub mod fetcher;

/// One acquisition run producing a [`Snapshot`](domain::Snapshot).
pub mod pipeline;

/// Periodic re-runs of the pipeline.
pub mod refresher;

/// HTTP front door (axum).
pub mod server;

/// The shared current snapshot.
pub mod store;
