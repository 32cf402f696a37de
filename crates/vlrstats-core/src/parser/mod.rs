//! HTML parsers for vlr.gg
//!
//! Contains modules for parsing different page types.

pub mod profile;
pub mod search;
pub mod stats;

pub use profile::parse_player_profile;
pub use search::parse_player_link;
pub use stats::{COLUMN_COUNT, extract_stat_records, parse_stats_table};
