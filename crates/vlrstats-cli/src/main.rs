//! CLI entry point for the vlr.gg stats scraper.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use vlrstats_core::{BatchConfig, BatchRunner, ClientConfig, CsvSink, Mode, VlrScraper, parse_names};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let (names, concurrent) = if !args.names.is_empty() {
        (parse_names(&args.names.join(",")), args.concurrent)
    } else if io::stdin().is_terminal() {
        let names = parse_names(&prompt("Enter the player names (comma-separated): ")?);
        let concurrent = args.concurrent
            || prompt("Do you want to scrape concurrently? (y/n): ")?
                .trim()
                .eq_ignore_ascii_case("y");
        (names, concurrent)
    } else {
        // Piped input: one or more lines of comma-separated names
        let mut names = Vec::new();
        for line in io::stdin().lock().lines() {
            names.extend(parse_names(&line?));
        }
        (names, args.concurrent)
    };

    if names.is_empty() {
        info!("No player names given");
        return Ok(());
    }

    let scraper = VlrScraper::with_config(ClientConfig {
        base_url: args.base_url.clone(),
        timeout_secs: args.timeout,
        ..ClientConfig::default()
    })
    .context("failed to initialize HTTP client")?;

    let config = BatchConfig {
        concurrency: usize::from(args.concurrency),
        ..BatchConfig::default()
    };
    let runner = BatchRunner::new(scraper, CsvSink::new(&args.output), config);

    let mode = if concurrent {
        Mode::Concurrent
    } else {
        Mode::Sequential
    };
    let summary = runner.run(&names, mode).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(
            found = summary.found,
            not_found = summary.not_found,
            failed = summary.failed,
            rows = summary.rows_written,
            output = %args.output.display(),
            "Done"
        );
    }

    Ok(())
}

/// Print a question and read one line of the answer
fn prompt(question: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", question)?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read from stdin")?;
    Ok(answer)
}
