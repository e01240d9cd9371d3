use crate::url::filename::page_filename;
use crate::{UrlError, UrlResult};
use std::path::{Path, PathBuf};
use url::Url;

/// A single input URL together with the file its body is written to
///
/// Targets are immutable once built; each one is moved into the task that
/// fetches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
    filename: PathBuf,
}

impl Target {
    /// Builds a target from a raw command-line argument
    ///
    /// The output file is the derived page filename placed under `output_dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use sumi_fetch::url::Target;
    ///
    /// let target = Target::parse("https://example.com/docs/", Path::new("out")).unwrap();
    /// assert_eq!(target.url().as_str(), "https://example.com/docs/");
    /// assert_eq!(target.filename(), Path::new("out/example.com/docs.html"));
    /// ```
    pub fn parse(input: &str, output_dir: &Path) -> UrlResult<Self> {
        let url = parse_target_url(input)?;
        Ok(Self::from_url(url, output_dir))
    }

    /// Builds a target from an already validated URL
    pub fn from_url(url: Url, output_dir: &Path) -> Self {
        let filename = output_dir.join(page_filename(&url));
        Self { url, filename }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Host name reported for this target (no port)
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

/// Parses a raw argument into an HTTP(S) URL
///
/// # Accepted Forms
///
/// - Absolute `http://` and `https://` URLs
/// - Bare `host/path` strings, which are fetched over `http://`
/// - Bare `host:port/path` strings, same as above
///
/// Anything else (other schemes, missing host, unparsable input) is rejected.
pub fn parse_target_url(input: &str) -> UrlResult<Url> {
    let trimmed = input.trim();

    let url = match Url::parse(trimmed) {
        Ok(url) if is_http(&url) => url,
        Ok(_) if looks_like_host_port(trimmed) => with_default_scheme(trimmed)?,
        Ok(url) => return Err(UrlError::InvalidScheme(url.scheme().to_string())),
        Err(url::ParseError::RelativeUrlWithoutBase) => with_default_scheme(trimmed)?,
        Err(e) => {
            return Err(UrlError::Parse {
                input: trimmed.to_string(),
                message: e.to_string(),
            })
        }
    };

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost(trimmed.to_string())),
    }
}

fn is_http(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}

/// `localhost:8080/x` parses with `localhost` as its scheme
fn looks_like_host_port(input: &str) -> bool {
    !input.contains("://")
        && input
            .split_once(':')
            .map(|(_, rest)| rest.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(false)
}

fn with_default_scheme(input: &str) -> UrlResult<Url> {
    Url::parse(&format!("http://{}", input)).map_err(|e| UrlError::Parse {
        input: input.to_string(),
        message: e.to_string(),
    })
}
