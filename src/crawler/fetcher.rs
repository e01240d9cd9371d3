//! HTTP fetcher implementation
//!
//! This module handles every request the tool makes:
//! - Building the shared HTTP client with the per-request timeout
//! - The single-request path that downloads a URL and writes it to a file
//! - Page fetches that additionally extract metadata and image sources
//! - Error classification (timeout vs. other network failures)

use crate::config::Config;
use crate::crawler::assets::{retrieve_assets, AssetReport};
use crate::crawler::parser::summarize_page;
use crate::output::Metadata;
use crate::url::Target;
use crate::SumiError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use url::Url;

/// Body and timing of a single request
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Full response body, exactly as written to disk
    pub body: Vec<u8>,

    /// Time from sending the request until the response headers arrived
    pub elapsed: Duration,
}

/// Everything a page fetch produced
#[derive(Debug, Clone)]
pub struct PageFetch {
    /// Full response body, exactly as written to disk
    pub body: Vec<u8>,

    /// Network round trip time
    pub elapsed: Duration,

    /// Present when metadata extraction is enabled
    pub metadata: Option<Metadata>,

    /// Image sources to download; empty unless asset retrieval is enabled
    pub image_sources: Vec<String>,
}

/// Builds an HTTP client with the configured request timeout
///
/// No headers beyond the client defaults are set.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sumi_fetch::crawler::build_http_client;
///
/// let client = build_http_client(Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Fetches one URL and writes its body to `path`
///
/// # Request Flow
///
/// 1. Send a GET request, timing until the response headers arrive
/// 2. Read the whole body into memory
/// 3. Create missing parent directories and write the body to `path`
///
/// Non-success status codes are logged and the body is written anyway.
/// Nothing is retried.
///
/// # Returns
///
/// * `Ok(FetchResult)` - The body and the round trip time
/// * `Err(SumiError::Timeout)` - The request exceeded the client timeout
/// * `Err(SumiError::Network)` - Any other request or body read failure
/// * `Err(SumiError::Write)` - The body could not be written
pub async fn fetch_to_file(
    client: &Client,
    url: &Url,
    path: &Path,
) -> Result<FetchResult, SumiError> {
    let start = Instant::now();
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;
    let elapsed = start.elapsed();

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} returned HTTP {}", url, status.as_u16());
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?
        .to_vec();

    write_body(path, &body).await?;
    tracing::debug!("Wrote {} bytes from {} to {}", body.len(), url, path.display());

    Ok(FetchResult { body, elapsed })
}

async fn write_body(path: &Path, body: &[u8]) -> Result<(), SumiError> {
    let to_write_error = |source| SumiError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(to_write_error)?;
    }

    tokio::fs::write(path, body).await.map_err(to_write_error)
}

fn classify_error(url: &Url, error: reqwest::Error) -> SumiError {
    if error.is_timeout() {
        SumiError::Timeout {
            url: url.to_string(),
        }
    } else {
        SumiError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Page fetcher shared by all dispatcher tasks
///
/// Cloning is cheap: the underlying client is reference counted. A fetcher
/// holds no mutable state, so clones can run concurrently without
/// coordination.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    extract_metadata: bool,
    fetch_assets: bool,
    output_dir: PathBuf,
}

impl Fetcher {
    /// Creates a fetcher, building its HTTP client from the configuration
    pub fn new(config: &Config) -> Result<Self, SumiError> {
        let client = build_http_client(Duration::from_secs(config.fetch.request_timeout_secs))?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            extract_metadata: config.fetch.extract_metadata,
            fetch_assets: config.fetch.fetch_assets,
            output_dir: PathBuf::from(&config.output.directory),
        }
    }

    /// Fetches a page, persists it, and extracts what the configuration asks for
    ///
    /// The body is always written before metadata is built, so any metadata
    /// returned describes a file that is already on disk.
    pub async fn fetch(&self, target: &Target) -> Result<PageFetch, SumiError> {
        let FetchResult { body, elapsed } =
            fetch_to_file(&self.client, target.url(), target.filename()).await?;

        let mut page = PageFetch {
            body,
            elapsed,
            metadata: None,
            image_sources: Vec::new(),
        };

        if !self.extract_metadata && !self.fetch_assets {
            return Ok(page);
        }

        let summary = summarize_page(&page.body);
        if self.extract_metadata {
            page.metadata = Some(Metadata {
                host: target.host().to_string(),
                links: summary.links,
                images: summary.images,
                took: elapsed,
            });
        }
        if self.fetch_assets {
            page.image_sources = summary.image_sources;
        }

        Ok(page)
    }

    /// Downloads the images of a fetched page into the output directory
    pub async fn retrieve_assets(&self, page: &Url, sources: &[String]) -> AssetReport {
        retrieve_assets(&self.client, page, sources, &self.output_dir).await
    }
}
