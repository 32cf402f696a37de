//! vlr.gg Player Stats Scraper Core Library
//!
//! Looks up players on vlr.gg, parses their all-time per-agent statistics
//! and appends them to a CSV file.
//!
//! # Overview
//!
//! This crate provides a complete pipeline with:
//! - HTTP client sending the browser headers the site requires
//! - HTML parsers for search results, profile pages and stats tables
//! - A CSV sink that writes its header once and serializes appends
//! - A batch runner that processes names sequentially (paced) or through
//!   a bounded worker pool
//!
//! # Example
//!
//! ```no_run
//! use vlrstats_core::{BatchConfig, BatchRunner, CsvSink, Mode, Result, VlrScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = VlrScraper::new()?;
//!     let runner = BatchRunner::new(
//!         scraper,
//!         CsvSink::new("all_players_stats.csv"),
//!         BatchConfig::default(),
//!     );
//!
//!     let names = vec!["TenZ".to_string(), "aspas".to_string()];
//!     let summary = runner.run(&names, Mode::Concurrent).await;
//!     println!("{} of {} players saved", summary.found, summary.total());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Output
//!
//! Rows are appended; running the same names twice writes their rows
//! twice. The header is only written while the file is empty.

mod batch;
mod client;
mod error;
pub mod parser;
mod scraper;
mod sink;
mod types;
pub mod url;

// Re-export batch runner
pub use batch::{
    BatchConfig, BatchRunner, BatchSummary, DEFAULT_CONCURRENCY, Mode, Pacer, PlayerReport,
    parse_names,
};

// Re-export client types
pub use client::{BASE_URL, ClientConfig, VlrClient};

// Re-export error types
pub use error::{Result, VlrError};

// Re-export parser functions
pub use parser::{extract_stat_records, parse_player_link, parse_player_profile};

// Re-export main scraper API
pub use crate::scraper::VlrScraper;

// Re-export output sink
pub use sink::{CsvSink, DEFAULT_OUTPUT};

// Re-export data types
pub use types::{CSV_HEADER, PlayerOutcome, PlayerResult, Stage, StatRecord, UNKNOWN};
