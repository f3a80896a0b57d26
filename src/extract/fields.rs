// src/extract/fields.rs

use tracing::trace;

use super::number::normalize_number;
use super::types::DividendRecord;
use super::year::is_year_token;

/// Column of the total cash dividend in the usual page layout.
pub const CASH_DIV_COL: usize = 4;
/// Column of the total stock dividend in the usual page layout.
pub const STOCK_DIV_COL: usize = 7;

/// Separator text that precedes the price block: `[--, price year, avg price, ...]`.
const ANCHOR: &str = "--";
const PRICE_OFFSET: usize = 2;

/// Strategy that located the average-price cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    /// Two cells after the first `--` separator.
    Anchor,
    /// No separator; the price year in the back half stands in for it.
    YearProbe,
    /// First positive number in the back half of the row.
    ValueScan,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceHit {
    pub tier: PriceTier,
    pub value: Option<f64>,
}

fn anchor_index(cells: &[String]) -> Option<usize> {
    cells.iter().position(|c| c.contains(ANCHOR))
}

/// Index the anchor would have had, inferred from the first year token in the
/// back half of the row.
fn year_probe_index(cells: &[String]) -> Option<usize> {
    cells
        .iter()
        .enumerate()
        .skip(cells.len() / 2)
        .find(|(_, c)| is_year_token(c))
        .and_then(|(i, _)| i.checked_sub(1))
}

fn value_scan(cells: &[String]) -> Option<f64> {
    cells[cells.len() / 2..]
        .iter()
        .filter_map(|c| normalize_number(Some(c.as_str())))
        .find(|v| *v > 0.0)
}

/// Run the average-price strategies in order.
///
/// Anchor and year probe only locate a position; once the cell at that
/// position exists its value is final, even when it does not parse. The value
/// scan runs only when neither produced an existing cell.
pub fn recover_avg_price(cells: &[String]) -> Option<PriceHit> {
    let located = anchor_index(cells)
        .map(|dash| (PriceTier::Anchor, dash))
        .or_else(|| year_probe_index(cells).map(|dash| (PriceTier::YearProbe, dash)));

    if let Some((tier, dash)) = located {
        if let Some(cell) = cells.get(dash + PRICE_OFFSET) {
            trace!(?tier, col = dash + PRICE_OFFSET, cell = %cell, "price cell located");
            return Some(PriceHit {
                tier,
                value: normalize_number(Some(cell.as_str())),
            });
        }
    }

    value_scan(cells).map(|v| PriceHit {
        tier: PriceTier::ValueScan,
        value: Some(v),
    })
}

/// Recover one record from a candidate row.
///
/// `None` when the leading year is not a positive integer or when none of the
/// three numeric fields could be recovered.
pub fn recover_fields(cells: &[String]) -> Option<DividendRecord> {
    let year = cells
        .first()?
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|y| *y > 0)?;

    let record = DividendRecord {
        year,
        cash_div: normalize_number(cells.get(CASH_DIV_COL).map(String::as_str)),
        stock_div: normalize_number(cells.get(STOCK_DIV_COL).map(String::as_str)),
        avg_price: recover_avg_price(cells).and_then(|hit| hit.value),
    };

    record.has_any_field().then_some(record)
}
