//! Batch runner: fans player names out over resolve → fetch → append
//!
//! Sequential runs keep input order and pause a random 1-2 s between
//! players. Concurrent runs use a bounded worker pool. Either way one
//! player's failure is logged, recorded in the summary and skipped.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use crate::error::{Result, VlrError};
use crate::scraper::VlrScraper;
use crate::sink::CsvSink;
use crate::types::{PlayerOutcome, Stage};

/// Worker pool size for concurrent runs
pub const DEFAULT_CONCURRENCY: usize = 5;

/// How the batch walks the name list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One player at a time, paced
    Sequential,
    /// Bounded worker pool, no pacing
    Concurrent,
}

/// Configuration for the batch runner
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// In-flight player pipelines in concurrent mode (default: 5)
    pub concurrency: usize,
    /// Shortest pause between players in sequential mode (default: 1 s)
    pub pacing_min: Duration,
    /// Longest pause between players in sequential mode (default: 2 s)
    pub pacing_max: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            pacing_min: Duration::from_secs(1),
            pacing_max: Duration::from_secs(2),
        }
    }
}

/// Randomized pause between sequential requests
///
/// Each pause is drawn uniformly from `[min, max]` at millisecond
/// resolution.
#[derive(Debug, Clone)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Draw the next delay
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let low = self.min.as_millis() as u64;
        let high = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(low..=high))
    }

    /// Sleep for a freshly drawn delay
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

/// Outcome for one requested name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerReport {
    /// Name as requested (trimmed)
    pub name: String,
    #[serde(flatten)]
    pub outcome: PlayerOutcome,
}

/// Everything a batch run did, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
    pub rows_written: usize,
    pub players: Vec<PlayerReport>,
}

impl BatchSummary {
    pub fn from_reports(players: Vec<PlayerReport>) -> Self {
        let found = players.iter().filter(|p| p.outcome.is_found()).count();
        let not_found = players.iter().filter(|p| p.outcome.is_not_found()).count();
        let rows_written = players.iter().map(|p| p.outcome.rows()).sum();
        Self {
            found,
            not_found,
            failed: players.len() - found - not_found,
            rows_written,
            players,
        }
    }

    /// Number of names attempted
    pub fn total(&self) -> usize {
        self.players.len()
    }
}

/// Splits a comma-separated list of player names
///
/// Entries are trimmed; empty entries are dropped.
///
/// # Example
/// ```
/// use vlrstats_core::parse_names;
/// assert_eq!(parse_names(" TenZ, aspas ,,"), vec!["TenZ", "aspas"]);
/// ```
pub fn parse_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drives the per-player pipeline over a list of names
pub struct BatchRunner {
    scraper: VlrScraper,
    sink: Arc<CsvSink>,
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(scraper: VlrScraper, sink: CsvSink, config: BatchConfig) -> Self {
        Self {
            scraper,
            sink: Arc::new(sink),
            config,
        }
    }

    /// Attempt every name and return the per-player outcomes
    ///
    /// Never fails as a whole: each player's errors are logged and
    /// recorded as a non-`Found` outcome.
    #[instrument(skip(self, names), fields(players = names.len()))]
    pub async fn run(&self, names: &[String], mode: Mode) -> BatchSummary {
        info!("collecting data for {} players", names.len());

        let players = match mode {
            Mode::Sequential => self.run_sequential(names).await,
            Mode::Concurrent => self.run_concurrent(names).await,
        };

        let summary = BatchSummary::from_reports(players);
        info!(
            found = summary.found,
            not_found = summary.not_found,
            failed = summary.failed,
            rows = summary.rows_written,
            "data collection completed"
        );
        summary
    }

    async fn run_sequential(&self, names: &[String]) -> Vec<PlayerReport> {
        let pacer = Pacer::new(self.config.pacing_min, self.config.pacing_max);
        let mut reports = Vec::with_capacity(names.len());

        for (index, name) in names.iter().enumerate() {
            info!(player = %name.trim(), "searching for player");
            let outcome = process_player(&self.scraper, &self.sink, name).await;
            reports.push(PlayerReport {
                name: name.trim().to_string(),
                outcome,
            });

            if index + 1 < names.len() {
                pacer.pause().await;
            }
        }

        reports
    }

    async fn run_concurrent(&self, names: &[String]) -> Vec<PlayerReport> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut handles = Vec::with_capacity(names.len());

        for name in names {
            let semaphore = Arc::clone(&semaphore);
            let scraper = self.scraper.clone();
            let sink = Arc::clone(&self.sink);
            let name = name.clone();

            handles.push(tokio::spawn(async move {
                // Permit is released when the task ends
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return PlayerOutcome::Failed {
                        message: "worker pool closed".to_string(),
                    };
                };
                process_player(&scraper, &sink, &name).await
            }));
        }

        let mut reports = Vec::with_capacity(names.len());
        for (name, handle) in names.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(player = %name.trim(), error = %e, "player task panicked");
                    PlayerOutcome::Failed {
                        message: format!("task failed: {}", e),
                    }
                }
            };
            reports.push(PlayerReport {
                name: name.trim().to_string(),
                outcome,
            });
        }

        reports
    }
}

/// Runs one player's pipeline and maps every result to an outcome
#[instrument(skip(scraper, sink, name), fields(player = %name.trim()))]
async fn process_player(
    scraper: &VlrScraper,
    sink: &Arc<CsvSink>,
    name: &str,
) -> PlayerOutcome {
    let outcome = match collect_player(scraper, sink, name).await {
        Ok(outcome) => outcome,
        Err(e) => outcome_for_error(&e),
    };

    match &outcome {
        PlayerOutcome::Found { display_name, rows } => {
            info!(display_name = %display_name, rows, "player stats saved")
        }
        PlayerOutcome::NotFound { stage } => warn!(?stage, "player skipped: not found"),
        PlayerOutcome::TransportError { message } => {
            error!(error = %message, "player skipped: request failed")
        }
        PlayerOutcome::MalformedRow { message } => {
            error!(error = %message, "player skipped: unexpected table layout")
        }
        PlayerOutcome::Failed { message } => error!(error = %message, "player skipped"),
    }

    outcome
}

async fn collect_player(
    scraper: &VlrScraper,
    sink: &Arc<CsvSink>,
    name: &str,
) -> Result<PlayerOutcome> {
    let Some(profile_url) = scraper.resolve_player(name).await? else {
        return Ok(PlayerOutcome::NotFound {
            stage: Stage::Search,
        });
    };

    let Some(result) = scraper.fetch_player(&profile_url).await? else {
        return Ok(PlayerOutcome::NotFound {
            stage: Stage::Profile,
        });
    };

    let display_name = result.name.clone();
    let rows = Arc::clone(sink).append_async(result).await?;

    Ok(PlayerOutcome::Found { display_name, rows })
}

fn outcome_for_error(error: &VlrError) -> PlayerOutcome {
    let message = error.to_string();
    match error {
        e if e.is_transport() => PlayerOutcome::TransportError { message },
        VlrError::MalformedRow { .. } => PlayerOutcome::MalformedRow { message },
        _ => PlayerOutcome::Failed { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.pacing_min, Duration::from_secs(1));
        assert_eq!(config.pacing_max, Duration::from_secs(2));
    }

    #[test]
    fn test_pacer_delay_within_bounds() {
        let pacer = Pacer::new(Duration::from_millis(1000), Duration::from_millis(2000));
        for _ in 0..100 {
            let delay = pacer.next_delay();
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_pacer_swaps_reversed_bounds() {
        let pacer = Pacer::new(Duration::from_millis(30), Duration::from_millis(10));
        let delay = pacer.next_delay();
        assert!(delay >= Duration::from_millis(10) && delay <= Duration::from_millis(30));
    }

    #[test]
    fn test_pacer_fixed_delay() {
        let pacer = Pacer::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(pacer.next_delay(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_pacer_pause_sleeps() {
        let pacer = Pacer::new(Duration::from_millis(50), Duration::from_millis(60));
        let start = std::time::Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(45));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_names("TenZ, aspas,Demon1 ,  ,"),
            vec!["TenZ", "aspas", "Demon1"]
        );
        assert!(parse_names("").is_empty());
        assert_eq!(parse_names("Boaster"), vec!["Boaster"]);
    }

    #[test]
    fn test_outcome_for_error() {
        let transport = VlrError::Status {
            url: "x".to_string(),
            status: 503,
        };
        assert!(matches!(
            outcome_for_error(&transport),
            PlayerOutcome::TransportError { .. }
        ));

        let malformed = VlrError::MalformedRow { row: 0, found: 4 };
        assert!(matches!(
            outcome_for_error(&malformed),
            PlayerOutcome::MalformedRow { .. }
        ));

        let name = VlrError::InvalidName("empty".to_string());
        assert!(matches!(
            outcome_for_error(&name),
            PlayerOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::from_reports(vec![
            PlayerReport {
                name: "a".to_string(),
                outcome: PlayerOutcome::Found {
                    display_name: "A".to_string(),
                    rows: 4,
                },
            },
            PlayerReport {
                name: "b".to_string(),
                outcome: PlayerOutcome::NotFound {
                    stage: Stage::Search,
                },
            },
            PlayerReport {
                name: "c".to_string(),
                outcome: PlayerOutcome::TransportError {
                    message: "HTTP 500".to_string(),
                },
            },
        ]);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.found, 1);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.rows_written, 4);
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = PlayerReport {
            name: "TestPlayerX".to_string(),
            outcome: PlayerOutcome::NotFound {
                stage: Stage::Search,
            },
        };
        let json = serde_json::to_string(&report).expect("Serialization should succeed");
        assert_eq!(
            json,
            r#"{"name":"TestPlayerX","outcome":"not_found","stage":"search"}"#
        );
    }
}
