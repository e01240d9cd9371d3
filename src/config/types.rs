use serde::Deserialize;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default capacity of the result channel
pub const DEFAULT_RESULT_BUFFER: usize = 16;

/// Main configuration structure for Sumi-Fetch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Extract link/image counts and report them
    #[serde(rename = "metadata", default)]
    pub extract_metadata: bool,

    /// Download the images referenced by each page
    #[serde(rename = "assets", default)]
    pub fetch_assets: bool,

    /// Timeout for a single request (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Capacity of the channel between dispatchers and the reporter
    #[serde(rename = "result-buffer", default = "default_result_buffer")]
    pub result_buffer: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            extract_metadata: false,
            fetch_assets: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            result_buffer: DEFAULT_RESULT_BUFFER,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory fetched files are written under
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_result_buffer() -> usize {
    DEFAULT_RESULT_BUFFER
}

fn default_directory() -> String {
    ".".to_string()
}
