//! Search results parser for vlr.gg
//!
//! Extracts the first player link from a search results page.

use scraper::{Html, Selector};

use crate::error::{Result, VlrError};

/// Parses a search results page and returns the first result's href
///
/// # Arguments
/// * `html` - Raw HTML string from the search page
///
/// # Returns
/// `Some(href)` (usually relative, e.g. `/player/9/tenz`) or `None`
/// if the page lists no results
///
/// # Errors
/// Returns `ElementNotFound` if the first result carries no usable href
pub fn parse_player_link(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);

    let link_selector = Selector::parse("a.search-item")
        .map_err(|e| VlrError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let Some(link) = document.select(&link_selector).next() else {
        return Ok(None);
    };

    match link.value().attr("href").map(str::trim) {
        Some(href) if !href.is_empty() => Ok(Some(href.to_string())),
        _ => Err(VlrError::ElementNotFound(
            "href on a.search-item".to_string(),
        )),
    }
}
