//! Output module for reporting fetch results
//!
//! This module handles:
//! - The per-fetch `Metadata` record and its console format
//! - The reporter task that prints records as fetches complete

mod metadata;
mod reporter;

pub use metadata::{Metadata, RECORD_SEPARATOR};
pub use reporter::{spawn_reporter, Reporter};
