//! # scholar-sync
//!
//! Fetch a Google Scholar author profile through SerpAPI, normalize every
//! publication into a fixed record shape, and store the list as JSON.
//!
//! ## Modules
//!
//! - [`config`] - Run configuration and defaults
//! - [`serpapi`] - SerpAPI `google_scholar_author` client
//! - [`normalize`] - Raw article to [`normalize::PublicationRecord`] mapping
//! - [`output`] - JSON persistence
//! - [`pipeline`] - Fetch, normalize, store
//! - [`report`] - Leveled progress reporting
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholar_sync::config::Config;
//! use scholar_sync::pipeline::{self, Sink};
//! use scholar_sync::report::TracingReporter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new(std::env::var("SERPAPI_KEY").ok(), None)?;
//!     let sink = Sink::File(config.output_path());
//!     let result = pipeline::run(&config, &sink, false, &TracingReporter::default()).await?;
//!     println!("Saved {} publications", result.total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod serpapi;

pub use error::{Result, ScholarError};
