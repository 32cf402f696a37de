//! Core data types for the vlr.gg stats scraper
//!
//! Contains the record schema written to CSV and the per-player outcome
//! reported by the batch runner.

use serde::{Deserialize, Serialize};

/// Placeholder for a missing player name or agent icon
pub const UNKNOWN: &str = "Unknown";

/// Column header of the output file, in write order
pub const CSV_HEADER: [&str; 18] = [
    "Name",
    "Agent",
    "Usage",
    "Rounds Played",
    "Rating",
    "ACS",
    "K:D",
    "ADR",
    "KAST",
    "KPR",
    "APR",
    "First Kills Per Round",
    "First Deaths Per Round",
    "Kills",
    "Deaths",
    "Assists",
    "First Kills",
    "First Deaths",
];

/// One row of a player's per-agent statistics table
///
/// Every value is the trimmed cell text as published; nothing is parsed
/// into numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub agent: String,
    pub usage: String,
    pub rounds_played: String,
    pub rating: String,
    pub acs: String,
    pub kd: String,
    pub adr: String,
    pub kast: String,
    pub kpr: String,
    pub apr: String,
    pub first_kills_per_round: String,
    pub first_deaths_per_round: String,
    pub kills: String,
    pub deaths: String,
    pub assists: String,
    pub first_kills: String,
    pub first_deaths: String,
}

impl StatRecord {
    /// Output row for this record, prefixed with the player's name
    ///
    /// Field order matches [`CSV_HEADER`].
    pub fn to_row<'a>(&'a self, name: &'a str) -> [&'a str; 18] {
        [
            name,
            &self.agent,
            &self.usage,
            &self.rounds_played,
            &self.rating,
            &self.acs,
            &self.kd,
            &self.adr,
            &self.kast,
            &self.kpr,
            &self.apr,
            &self.first_kills_per_round,
            &self.first_deaths_per_round,
            &self.kills,
            &self.deaths,
            &self.assists,
            &self.first_kills,
            &self.first_deaths,
        ]
    }
}

/// Statistics scraped from one profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    /// Display name from the profile title
    pub name: String,
    /// One record per agent, in table order
    pub stats: Vec<StatRecord>,
}

/// Pipeline step that came up empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No player link on the search page
    Search,
    /// No stats table on the profile page
    Profile,
}

/// What happened to one requested player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlayerOutcome {
    /// Rows were appended to the output file
    Found { display_name: String, rows: usize },
    /// Expected entity missing; not an error
    NotFound { stage: Stage },
    /// Network failure or non-success status
    TransportError { message: String },
    /// Stats table did not match the fixed column layout
    MalformedRow { message: String },
    /// Anything else (bad name, output file, task panic)
    Failed { message: String },
}

impl PlayerOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PlayerOutcome::Found { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlayerOutcome::NotFound { .. })
    }

    /// Rows written for this player
    pub fn rows(&self) -> usize {
        match self {
            PlayerOutcome::Found { rows, .. } => *rows,
            _ => 0,
        }
    }
}
