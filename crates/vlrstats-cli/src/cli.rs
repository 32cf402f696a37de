//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use vlrstats_core::{BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_OUTPUT};

/// Collect all-time per-agent stats for vlr.gg players into a CSV file.
///
/// Names can be passed as arguments (comma-separated or one per argument).
/// Without names the tool asks for them interactively.
#[derive(Parser, Debug)]
#[command(name = "vlrstats")]
#[command(author, version, about)]
pub struct Args {
    /// Player names, e.g. `TenZ,aspas` or `TenZ aspas`
    pub names: Vec<String>,

    /// Process players through a worker pool instead of one at a time
    #[arg(long)]
    pub concurrent: bool,

    /// Output CSV file (appended to; header written only when empty)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Worker pool size for --concurrent (1-32)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=32))]
    pub concurrency: u8,

    /// Request timeout in seconds (1-300)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// Site origin to query
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    /// Print the per-player summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
