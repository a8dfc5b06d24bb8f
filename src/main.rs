//! scholar-sync - Google Scholar author profile sync
//!
//! Fetches an author's publications through SerpAPI and writes them to
//! `data/scholar.json` in a simplified schema.
//!
//! ## Usage
//!
//! ```bash
//! # SERPAPI_KEY from the environment or .env
//! scholar-sync
//! scholar-sync fetch --author-id 61Ou1P8AAAAJ --output-dir data --save-raw
//!
//! # Re-normalize a saved response without touching the network
//! scholar-sync normalize data/scholar_raw.json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scholar_sync::config::{self, Config};
use scholar_sync::normalize::RunResult;
use scholar_sync::pipeline::{self, Sink};
use scholar_sync::report::{TracingReporter, Verbosity};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Google Scholar author profile sync
#[derive(Parser)]
#[command(name = "scholar-sync")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    // Running without a subcommand is the same as `fetch`
    #[command(flatten)]
    fetch: FetchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the author profile from SerpAPI and store it
    Fetch(FetchArgs),

    /// Normalize a saved raw SerpAPI response
    Normalize(NormalizeArgs),
}

#[derive(Args)]
struct FetchArgs {
    /// SerpAPI key
    #[arg(long, env = "SERPAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Google Scholar author id
    #[arg(long, env = "GOOGLE_SCHOLAR_ID")]
    author_id: Option<String>,

    /// SerpAPI base URL
    #[arg(long, env = "SERPAPI_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Also write the unmodified response to scholar_raw.json
    #[arg(long)]
    save_raw: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct NormalizeArgs {
    /// Raw response file (JSON)
    input: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Output directory
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Print the JSON array to stdout instead of writing scholar.json
    #[arg(long)]
    stdout: bool,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "debug")]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl CommonArgs {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Verbose
        }
    }

    fn sink(&self, output_path: &Path) -> Sink {
        if self.stdout {
            Sink::Stdout
        } else {
            Sink::File(output_path.to_path_buf())
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Real environment variables take precedence over .env entries.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Fetch(args)) => run_fetch(args).await,
        Some(Commands::Normalize(args)) => run_normalize(args),
        None => run_fetch(cli.fetch).await,
    }
}

fn init_logging(common: &CommonArgs) {
    let log_level = if common.debug {
        Level::DEBUG
    } else if common.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    // stdout is reserved for --stdout output
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// Commands
// ============================================================================

async fn run_fetch(args: FetchArgs) -> Result<()> {
    init_logging(&args.common);

    let config = Config::new(args.api_key, args.author_id)?
        .with_base_url(&args.base_url)?
        .with_output_dir(args.common.output_dir.clone())
        .with_verbosity(args.common.verbosity());

    let reporter = TracingReporter::new(config.verbosity);
    let sink = args.common.sink(&config.output_path());

    let result = pipeline::run(&config, &sink, args.save_raw, &reporter)
        .await
        .context("Failed to sync Google Scholar publications")?;

    print_summary(&sink, &result);
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    init_logging(&args.common);

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let reporter = TracingReporter::new(args.common.verbosity());
    let sink = args
        .common
        .sink(&args.common.output_dir.join(config::OUTPUT_FILE_NAME));

    let result = pipeline::process(&raw, &sink, &reporter).context("Failed to normalize response")?;

    print_summary(&sink, &result);
    Ok(())
}

/// Completion lines on stdout; skipped when stdout carries the JSON itself
fn print_summary(sink: &Sink, result: &RunResult) {
    if let Sink::File(path) = sink {
        println!("Successfully scraped {} papers from Google Scholar", result.total);
        println!("Data saved to {}", path.display());
    }
}
