//! Image asset retrieval
//!
//! Assets are fetched one after another through the same single-request path
//! as pages. A failing asset is logged and skipped; it never fails the page.

use crate::crawler::fetcher::fetch_to_file;
use crate::url::{asset_filename, resolve_asset_url};
use reqwest::Client;
use std::path::Path;
use url::Url;

/// Outcome counts of one page's asset downloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetReport {
    /// Assets downloaded and written
    pub fetched: usize,

    /// Assets whose request or write failed
    pub failed: usize,

    /// Sources that did not resolve to an HTTP(S) URL
    pub skipped: usize,
}

/// Downloads every image source found on `page`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `page` - URL of the page the sources were found on
/// * `sources` - Raw `src` attribute values
/// * `output_dir` - Directory the assets are written under
///
/// Each asset is written to a path derived from its raw `src` value (see
/// `asset_filename`), not from the resolved URL.
pub async fn retrieve_assets(
    client: &Client,
    page: &Url,
    sources: &[String],
    output_dir: &Path,
) -> AssetReport {
    let mut report = AssetReport::default();

    for src in sources {
        let Some(asset_url) = resolve_asset_url(page, src) else {
            tracing::debug!("Skipping asset '{}' on {}", src, page);
            report.skipped += 1;
            continue;
        };

        let path = output_dir.join(asset_filename(src));
        match fetch_to_file(client, &asset_url, &path).await {
            Ok(result) => {
                tracing::debug!(
                    "Fetched asset {} ({} bytes) in {:?}",
                    asset_url,
                    result.body.len(),
                    result.elapsed
                );
                report.fetched += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch asset {} for {}: {}", asset_url, page, e);
                report.failed += 1;
            }
        }
    }

    report
}
