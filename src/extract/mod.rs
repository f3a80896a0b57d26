// src/extract/mod.rs

pub mod fields;
pub mod number;
pub mod rows;
pub mod types;
pub mod year;

use anyhow::{Context, Result};
use scraper::Html;
use std::path::Path;
use tracing::{debug, info, instrument};

pub use fields::{recover_avg_price, recover_fields, PriceTier};
pub use number::normalize_number;
pub use rows::{select_candidate_rows, MIN_ROW_CELLS};
pub use types::{DividendItem, DividendRecord, MissingValue};
pub use year::is_year_token;

/// Candidate rows are echoed to the log until this many records are kept.
const DEBUG_ROWS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub min_cells: usize,
    /// Log the first few candidate rows and how their price was found.
    pub debug: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_cells: MIN_ROW_CELLS,
            debug: false,
        }
    }
}

/// Turn candidate rows into records, newest year first.
///
/// Rows sharing a year are all kept, in document order.
pub fn assemble(candidates: &[Vec<String>], debug: bool) -> Vec<DividendRecord> {
    let mut items: Vec<DividendRecord> = Vec::with_capacity(candidates.len());

    for (idx, cells) in candidates.iter().enumerate() {
        if debug && items.len() < DEBUG_ROWS {
            let tier = recover_avg_price(cells).map(|hit| hit.tier);
            info!(row = idx, ?cells, price_tier = ?tier, "candidate row");
        }
        match recover_fields(cells) {
            Some(record) => items.push(record),
            None => debug!(row = idx, first = ?cells.first(), "row yielded no fields"),
        }
    }

    items.sort_by(|a, b| b.year.cmp(&a.year));
    items
}

/// Extract the dividend history table from a raw page.
#[instrument(level = "debug", skip(html), fields(html_len = html.len()))]
pub fn extract_dividend_rows(html: &str, opts: &ExtractOptions) -> Vec<DividendRecord> {
    let doc = Html::parse_document(html);
    let candidates = select_candidate_rows(&doc, opts.min_cells);
    let items = assemble(&candidates, opts.debug);
    debug!(candidates = candidates.len(), items = items.len(), "extraction finished");
    items
}

/// Extract from a page saved on disk.
pub fn extract_from_file<P: AsRef<Path>>(path: P, opts: &ExtractOptions) -> Result<Vec<DividendRecord>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let html = String::from_utf8_lossy(&bytes);
    Ok(extract_dividend_rows(&html, opts))
}
