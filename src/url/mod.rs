//! URL handling module for Sumi-Fetch
//!
//! This module turns raw arguments into fetch targets, derives the filenames
//! fetched bodies are stored under, and resolves image sources against the
//! page that referenced them.

mod filename;
mod resolve;
mod target;

// Re-export main functions
pub use filename::{asset_filename, page_filename};
pub use resolve::resolve_asset_url;
pub use target::{parse_target_url, Target};
