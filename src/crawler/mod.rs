//! Crawler module for concurrent page fetching
//!
//! This module contains the fetch pipeline, including:
//! - HTTP fetching and persisting bodies to disk
//! - HTML tree walking for link/image counts
//! - Image asset retrieval
//! - Per-target dispatch and overall run coordination

mod assets;
mod coordinator;
mod dispatcher;
mod fetcher;
mod parser;
mod tracker;

pub use assets::{retrieve_assets, AssetReport};
pub use coordinator::{run_batch, Coordinator, RunSummary};
pub use dispatcher::dispatch;
pub use fetcher::{build_http_client, fetch_to_file, FetchResult, Fetcher, PageFetch};
pub use parser::{locate, summarize_page, PageSummary};
pub use tracker::{PendingGuard, PendingTracker};
