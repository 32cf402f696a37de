//! Append-only CSV output shared by all player pipelines

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::error::Result;
use crate::types::{CSV_HEADER, PlayerResult};

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "all_players_stats.csv";

/// CSV file that player results are appended to
///
/// Every [`append`](CsvSink::append) holds an internal lock for the whole
/// open / header check / write / flush sequence, so concurrent callers can
/// neither duplicate the header nor interleave their rows. The lock is a
/// blocking one; async callers go through [`append_async`](CsvSink::append_async).
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row per stat record, prefixed with the player's name
    ///
    /// Writes the header first if the file is empty (or new).
    ///
    /// # Returns
    /// Number of data rows written
    ///
    /// # Errors
    /// `Io` if the file cannot be opened, `Csv` if a write fails
    pub fn append(&self, result: &PlayerResult) -> Result<usize> {
        // A poisoned lock only means another writer panicked mid-append
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            debug!(path = %self.path.display(), "writing header");
            writer.write_record(CSV_HEADER)?;
        }

        for record in &result.stats {
            writer.write_record(record.to_row(&result.name))?;
        }

        writer.flush()?;

        info!(
            player = %result.name,
            rows = result.stats.len(),
            path = %self.path.display(),
            "appended player stats"
        );
        Ok(result.stats.len())
    }

    /// [`append`](CsvSink::append) on tokio's blocking pool
    ///
    /// Runtime workers never wait on the file or on the lock.
    ///
    /// # Errors
    /// Same as `append`; a panicked write task surfaces as `Io`
    pub async fn append_async(self: Arc<Self>, result: PlayerResult) -> Result<usize> {
        tokio::task::spawn_blocking(move || self.append(&result))
            .await
            .map_err(|e| std::io::Error::other(format!("CSV write task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VlrError;
    use crate::types::StatRecord;

    fn record(agent: &str) -> StatRecord {
        StatRecord {
            agent: agent.to_string(),
            usage: "(10) 50%".to_string(),
            rounds_played: "200".to_string(),
            rating: "1.05".to_string(),
            acs: "210.0".to_string(),
            kd: "1.02".to_string(),
            adr: "140.1".to_string(),
            kast: "70%".to_string(),
            kpr: "0.75".to_string(),
            apr: "0.30".to_string(),
            first_kills_per_round: "0.10".to_string(),
            first_deaths_per_round: "0.09".to_string(),
            kills: "150".to_string(),
            deaths: "147".to_string(),
            assists: "60".to_string(),
            first_kills: "20".to_string(),
            first_deaths: "18".to_string(),
        }
    }

    fn player(name: &str, agents: &[&str]) -> PlayerResult {
        PlayerResult {
            name: name.to_string(),
            stats: agents.iter().map(|a| record(a)).collect(),
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_written_for_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("out.csv"));

        let rows = sink.append(&player("TenZ", &["Jett", "Sova"])).unwrap();
        assert_eq!(rows, 2);

        let lines = read_lines(sink.path());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].starts_with("TenZ,Jett,(10) 50%,200,1.05"));
        assert!(lines[2].starts_with("TenZ,Sova,"));
    }

    #[test]
    fn test_header_written_once_across_appends_and_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let sink = CsvSink::new(&path);
        sink.append(&player("A", &["Jett"])).unwrap();
        sink.append(&player("B", &["Omen"])).unwrap();

        // A later run against the same file
        let again = CsvSink::new(&path);
        again.append(&player("A", &["Jett"])).unwrap();

        let lines = read_lines(&path);
        let headers = lines.iter().filter(|l| l.starts_with("Name,")).count();
        assert_eq!(headers, 1);
        assert_eq!(lines.len(), 4);
        // Re-running appends duplicates; no dedup
        assert_eq!(lines[1], lines[3]);
    }

    #[test]
    fn test_existing_content_gets_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "pre-existing\n").unwrap();

        CsvSink::new(&path).append(&player("X", &["Sage"])).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines[0], "pre-existing");
        assert!(lines[1].starts_with("X,Sage,"));
    }

    #[test]
    fn test_empty_stats_on_new_file_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("out.csv"));

        assert_eq!(sink.append(&player("Nobody", &[])).unwrap(), 0);
        assert_eq!(read_lines(sink.path()).len(), 1);
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("out.csv"));

        sink.append(&player("Last, First", &["KAY/O"])).unwrap();

        let lines = read_lines(sink.path());
        assert!(lines[1].starts_with("\"Last, First\",KAY/O,"));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("missing").join("out.csv"));

        match sink.append(&player("A", &["Jett"])) {
            Err(VlrError::Io(_)) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_concurrent_appends_keep_rows_contiguous() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(CsvSink::new(dir.path().join("out.csv")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    let name = format!("P{}", i);
                    sink.append(&player(&name, &["Jett", "Sova", "Omen"])).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = read_lines(sink.path());
        assert_eq!(lines.len(), 1 + 8 * 3);
        assert_eq!(lines.iter().filter(|l| l.starts_with("Name,")).count(), 1);

        for chunk in lines[1..].chunks(3) {
            let name = chunk[0].split(',').next().unwrap();
            assert!(chunk.iter().all(|l| l.starts_with(&format!("{},", name))));
            assert!(chunk[0].contains(",Jett,"));
            assert!(chunk[1].contains(",Sova,"));
            assert!(chunk[2].contains(",Omen,"));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_append_async_from_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(CsvSink::new(dir.path().join("out.csv")));

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let sink = Arc::clone(&sink);
                tokio::spawn(async move {
                    sink.append_async(player(&format!("P{}", i), &["Raze", "Skye"]))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 2);
        }

        let lines = read_lines(sink.path());
        assert_eq!(lines.len(), 1 + 6 * 2);
        assert_eq!(lines.iter().filter(|l| l.starts_with("Name,")).count(), 1);
        for pair in lines[1..].chunks(2) {
            assert!(pair[0].contains(",Raze,"));
            assert!(pair[1].contains(",Skye,"));
        }
    }

    #[tokio::test]
    async fn test_append_async_propagates_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(CsvSink::new(dir.path().join("missing").join("out.csv")));

        match sink.append_async(player("A", &["Jett"])).await {
            Err(VlrError::Io(_)) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
