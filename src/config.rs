//! Runtime configuration.
//!
//! Values come from the command line, the process environment, or a `.env`
//! file loaded at startup. `Config::new` is the single validation point: a run
//! without an API key never gets as far as building an HTTP client.

use crate::error::{Result, ScholarError};
use crate::report::Verbosity;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// SerpAPI search endpoint
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Scholar profile used when no author id is configured
pub const DEFAULT_AUTHOR_ID: &str = "61Ou1P8AAAAJ";

/// Output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Name of the normalized output file inside the output directory
pub const OUTPUT_FILE_NAME: &str = "scholar.json";

/// Name of the raw response dump written with `--save-raw`
pub const RAW_FILE_NAME: &str = "scholar_raw.json";

/// Request timeout for the single API call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one invocation.
#[derive(Clone)]
pub struct Config {
    /// SerpAPI key (always non-empty)
    pub api_key: String,
    /// Google Scholar author id
    pub author_id: String,
    /// SerpAPI base URL (overridable for mock servers)
    pub base_url: String,
    /// Directory receiving `scholar.json`
    pub output_dir: PathBuf,
    /// Request timeout
    pub request_timeout: Duration,
    /// How much the reporter lets through
    pub verbosity: Verbosity,
}

impl Config {
    /// Build a validated configuration.
    ///
    /// An empty or whitespace-only key counts as missing. An empty author id
    /// falls back to [`DEFAULT_AUTHOR_ID`].
    ///
    /// # Errors
    ///
    /// Returns [`ScholarError::MissingApiKey`] if no usable key is given.
    pub fn new(api_key: Option<String>, author_id: Option<String>) -> Result<Self> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ScholarError::MissingApiKey)?;

        let author_id = author_id
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR_ID.to_string());

        Ok(Self {
            api_key,
            author_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout: REQUEST_TIMEOUT,
            verbosity: Verbosity::Verbose,
        })
    }

    /// Configuration pointing at a mock server, writing into `output_dir`.
    pub fn for_testing(base_url: &str, output_dir: &Path) -> Self {
        Self {
            api_key: "test-key".to_string(),
            author_id: DEFAULT_AUTHOR_ID.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            output_dir: output_dir.to_path_buf(),
            request_timeout: Duration::from_secs(5),
            verbosity: Verbosity::Verbose,
        }
    }

    /// Override the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScholarError::Config`] if the URL does not parse.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        url::Url::parse(base_url)
            .map_err(|e| ScholarError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Full path of the normalized output file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }

    /// Full path of the raw response dump.
    pub fn raw_output_path(&self) -> PathBuf {
        self.output_dir.join(RAW_FILE_NAME)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("author_id", &self.author_id)
            .field("base_url", &self.base_url)
            .field("output_dir", &self.output_dir)
            .field("request_timeout", &self.request_timeout)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}
