//! Player profile page parser for vlr.gg

use scraper::{Html, Selector};

use crate::error::{Result, VlrError};
use crate::parser::stats::parse_stats_table;
use crate::types::{PlayerResult, UNKNOWN};

/// Parses a profile page into the player's display name and stats
///
/// # Arguments
/// * `html` - Raw HTML string from the profile page (all-time view)
///
/// # Returns
/// `Some(PlayerResult)`, or `None` if the page has no stats table.
/// A missing title is not an error; the name falls back to `"Unknown"`.
///
/// # Errors
/// Propagates `MalformedRow` from the table parser
pub fn parse_player_profile(html: &str) -> Result<Option<PlayerResult>> {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("h1.wf-title")
        .map_err(|e| VlrError::ParseError(format!("Invalid selector: {:?}", e)))?;
    let table_selector = Selector::parse("table.wf-table")
        .map_err(|e| VlrError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let name = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let Some(table) = document.select(&table_selector).next() else {
        return Ok(None);
    };

    let stats = parse_stats_table(&table)?;

    Ok(Some(PlayerResult { name, stats }))
}
