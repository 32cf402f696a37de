//! Per-agent statistics table parser
//!
//! Turns the rows of a profile's stats table into [`StatRecord`]s.
//! Cells are read by fixed position; the layout below mirrors the table
//! as the site publishes it today.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};
use crate::types::{StatRecord, UNKNOWN};

/// Column positions inside a stats row
pub mod column {
    pub const AGENT: usize = 0;
    pub const USAGE: usize = 1;
    pub const ROUNDS_PLAYED: usize = 2;
    pub const RATING: usize = 3;
    pub const ACS: usize = 4;
    pub const KD: usize = 5;
    pub const ADR: usize = 6;
    pub const KAST: usize = 7;
    pub const KPR: usize = 8;
    pub const APR: usize = 9;
    pub const FIRST_KILLS_PER_ROUND: usize = 10;
    pub const FIRST_DEATHS_PER_ROUND: usize = 11;
    pub const KILLS: usize = 12;
    pub const DEATHS: usize = 13;
    pub const ASSISTS: usize = 14;
    pub const FIRST_KILLS: usize = 15;
    pub const FIRST_DEATHS: usize = 16;
}

/// Cells every qualifying row must carry
pub const COLUMN_COUNT: usize = 17;

/// Rows with fewer cells are not stats rows (spacers, headers)
const MIN_CELLS: usize = 2;

/// Parses the rows of a stats table element
///
/// # Arguments
/// * `table` - The `<table>` element
///
/// # Returns
/// One record per qualifying body row, in document order
///
/// # Errors
/// Returns `MalformedRow` if a row has at least two cells but fewer than
/// [`COLUMN_COUNT`]. One bad row fails the whole table.
pub fn parse_stats_table(table: &ElementRef) -> Result<Vec<StatRecord>> {
    let mut records = Vec::new();

    // Only this table's own body rows; tables nested in a cell are content
    let rows = child_elements(*table, "tbody").flat_map(|body| child_elements(body, "tr"));

    for (index, row) in rows.enumerate() {
        let cells: Vec<ElementRef> = child_elements(row, "td").collect();

        if cells.len() < MIN_CELLS {
            debug!(row = index, cells = cells.len(), "skipping row without stats");
            continue;
        }

        records.push(parse_row(index, &cells)?);
    }

    Ok(records)
}

/// Parses a stats table given as an HTML fragment
///
/// Accepts a whole `<table>`, a `<tbody>` or bare `<tr>` rows.
///
/// # Example
/// ```
/// use vlrstats_core::extract_stat_records;
/// let records = extract_stat_records("<tr><td>spacer</td></tr>").unwrap();
/// assert!(records.is_empty());
/// ```
pub fn extract_stat_records(fragment: &str) -> Result<Vec<StatRecord>> {
    // Rows outside a table are dropped by the HTML parser, so wrap them
    let html = if fragment.contains("<table") {
        fragment.to_string()
    } else {
        format!("<table>{}</table>", fragment)
    };
    let document = Html::parse_fragment(&html);

    let table_selector = Selector::parse("table")
        .map_err(|e| VlrError::ParseError(format!("Invalid selector: {:?}", e)))?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| VlrError::ElementNotFound("table".to_string()))?;

    parse_stats_table(&table)
}

/// Direct element children with the given tag name
fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

fn parse_row(index: usize, cells: &[ElementRef]) -> Result<StatRecord> {
    if cells.len() < COLUMN_COUNT {
        return Err(VlrError::MalformedRow {
            row: index,
            found: cells.len(),
        });
    }

    let text = |col: usize| cell_text(&cells[col]);

    Ok(StatRecord {
        agent: agent_name(&cells[column::AGENT]),
        usage: text(column::USAGE),
        rounds_played: text(column::ROUNDS_PLAYED),
        rating: text(column::RATING),
        acs: text(column::ACS),
        kd: text(column::KD),
        adr: text(column::ADR),
        kast: text(column::KAST),
        kpr: text(column::KPR),
        apr: text(column::APR),
        first_kills_per_round: text(column::FIRST_KILLS_PER_ROUND),
        first_deaths_per_round: text(column::FIRST_DEATHS_PER_ROUND),
        kills: text(column::KILLS),
        deaths: text(column::DEATHS),
        assists: text(column::ASSISTS),
        first_kills: text(column::FIRST_KILLS),
        first_deaths: text(column::FIRST_DEATHS),
    })
}

/// Agent name from the icon's alt text
fn agent_name(cell: &ElementRef) -> String {
    let Ok(img_selector) = Selector::parse("img") else {
        return UNKNOWN.to_string();
    };

    cell.select(&img_selector)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map(|alt| alt.trim().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
