//! Configuration module for Sumi-Fetch
//!
//! Configuration comes from an optional TOML file and is then adjusted by
//! command-line flags. Every key has a default, so running without a file is
//! the common case.
//!
//! # Example
//!
//! ```no_run
//! use sumi_fetch::config::{load_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let mut config = load_config(Path::new("fetch.toml")).unwrap();
//! let overrides = ConfigOverrides { extract_metadata: true, ..Default::default() };
//! overrides.apply(&mut config).unwrap();
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_BUFFER,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;

use crate::ConfigError;

/// Command-line adjustments applied on top of the loaded configuration
///
/// Boolean flags only ever switch their option on; the remaining fields
/// replace the configured value when present.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub extract_metadata: bool,
    pub fetch_assets: bool,
    pub output_dir: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Applies the overrides and re-validates the result
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if self.extract_metadata {
            config.fetch.extract_metadata = true;
        }
        if self.fetch_assets {
            config.fetch.fetch_assets = true;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if let Some(timeout) = self.request_timeout_secs {
            config.fetch.request_timeout_secs = timeout;
        }
        validate(config)
    }
}
