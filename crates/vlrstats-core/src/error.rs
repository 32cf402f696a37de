//! Error types for the vlr.gg stats scraper
//!
//! Provides a single error enum with human-readable messages
//! and string serialization for reports.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// so batch summaries can carry errors as plain strings.
#[derive(Error, Debug)]
pub enum VlrError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Expected HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Player name is empty after trimming
    #[error("Invalid player name: {0}")]
    InvalidName(String),

    /// A stats row passed the two-cell guard but is missing a fixed column
    #[error("Malformed stats row {row}: expected 17 cells, found {found}")]
    MalformedRow { row: usize, found: usize },

    /// Output file could not be opened or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl VlrError {
    /// Whether the error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, VlrError::HttpError(_) | VlrError::Status { .. })
    }
}

impl Serialize for VlrError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, VlrError>;
