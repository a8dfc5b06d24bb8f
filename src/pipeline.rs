//! End-to-end run: fetch, normalize, store.

use crate::config::Config;
use crate::error::Result;
use crate::normalize::{normalize_response, RunResult};
use crate::output;
use crate::report::Reporter;
use crate::serpapi::SerpApiClient;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;

/// Where normalized records end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Overwrite this JSON file
    File(PathBuf),
    /// Print the JSON array on stdout
    Stdout,
}

/// Fetch the configured author's profile and store the normalized records.
///
/// With `save_raw`, the unmodified response is also written to
/// [`Config::raw_output_path`] before normalization.
///
/// # Errors
///
/// Fails if the API call fails, the response is not the expected shape, or
/// the output cannot be written. Malformed articles and empty profiles are
/// reported, not returned as errors.
pub async fn run(
    config: &Config,
    sink: &Sink,
    save_raw: bool,
    reporter: &dyn Reporter,
) -> Result<RunResult> {
    reporter.info(&format!(
        "Fetching publications for Scholar ID: {}",
        config.author_id
    ));

    let client = SerpApiClient::new(config)?;
    let raw = client.fetch_author(&config.author_id).await?;

    if save_raw {
        let raw_path = config.raw_output_path();
        output::write_raw(&raw_path, &raw)?;
        reporter.info(&format!("Raw response saved to {}", raw_path.display()));
    }

    process(&raw, sink, reporter)
}

/// Normalize an already-fetched response and store it.
pub fn process(raw: &Value, sink: &Sink, reporter: &dyn Reporter) -> Result<RunResult> {
    let result = normalize_response(raw, reporter)?;

    match sink {
        Sink::File(path) => output::write_records(path, &result.records)?,
        Sink::Stdout => {
            let rendered = output::render_records(&result.records)?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
            stdout.flush()?;
        }
    }

    if result.skipped > 0 {
        reporter.warn(&format!(
            "Skipped {} malformed articles",
            result.skipped
        ));
    }

    Ok(result)
}
