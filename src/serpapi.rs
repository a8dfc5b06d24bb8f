//! SerpAPI client for Google Scholar author profiles.
//!
//! Issues the single `google_scholar_author` request and hands back the raw
//! JSON body untouched. Shape checking is the normalizer's job.

use crate::config::Config;
use crate::error::{Result, ScholarError};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Engine selector for author profile lookups
pub const ENGINE: &str = "google_scholar_author";

/// Sort order: newest publications first
pub const SORT_BY_PUBDATE: &str = "pubdate";

/// Path of the search endpoint under the base URL
const SEARCH_PATH: &str = "/search.json";

/// Thin wrapper over a configured `reqwest::Client`
pub struct SerpApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SerpApiClient {
    /// Create a client from the run configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("scholar-sync/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ScholarError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch the author profile, articles sorted by publication date.
    ///
    /// # Errors
    ///
    /// Any failure (transport, non-success status, `error` field in the body,
    /// non-JSON body) is fatal for the run. There is no retry.
    pub async fn fetch_author(&self, author_id: &str) -> Result<Value> {
        let url = build_author_url(&self.base_url, author_id, &self.api_key)?;

        debug!(author_id = author_id, engine = ENGINE, "Requesting author profile");
        debug!(endpoint = %format!("{}{}", self.base_url, SEARCH_PATH), "Sending request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScholarError::Api {
                code: status.as_u16(),
                message: api_error_message(&body).unwrap_or_else(|| format!("HTTP error: {}", status)),
            });
        }

        let raw: Value = serde_json::from_str(&body)?;

        if let Some(message) = raw.get("error").and_then(Value::as_str) {
            return Err(ScholarError::Api {
                code: status.as_u16(),
                message: message.to_string(),
            });
        }

        debug!(bytes = body.len(), "Received author profile");
        Ok(raw)
    }
}

/// Build the author search URL
fn build_author_url(base_url: &str, author_id: &str, api_key: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH))
        .map_err(|e| ScholarError::Config(format!("Invalid base URL: {}", e)))?;

    url.query_pairs_mut()
        .append_pair("engine", ENGINE)
        .append_pair("author_id", author_id)
        .append_pair("api_key", api_key)
        .append_pair("sort", SORT_BY_PUBDATE);

    Ok(url)
}

/// Pull the `error` string out of a JSON error body, if there is one
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}
