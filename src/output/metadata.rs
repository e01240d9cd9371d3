use std::fmt;
use std::time::Duration;

/// Separator printed above every record
pub const RECORD_SEPARATOR: &str = "-------------------------";

/// Summary of one successful page fetch
///
/// Built once by the fetcher after the body is on disk and handed by value
/// to the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Host the page was fetched from (no port)
    pub host: String,

    /// Number of `<a>` elements on the page
    pub links: usize,

    /// Number of `<img>` elements on the page
    pub images: usize,

    /// Network round trip time
    pub took: Duration,
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RECORD_SEPARATOR)?;
        writeln!(f, "Calling: {}", self.host)?;
        writeln!(f, "Links: {}", self.links)?;
        writeln!(f, "Images: {}", self.images)?;
        writeln!(f, "Took: {:?}", self.took)
    }
}
