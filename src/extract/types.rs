// src/extract/types.rs

use serde::Serialize;

/// One year of dividend history as recovered from the page.
///
/// Fields the heuristics could not locate stay `None`; whether they are
/// reported as `0` or `null` is decided when the record is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DividendRecord {
    pub year: i32,
    pub cash_div: Option<f64>,
    pub stock_div: Option<f64>,
    pub avg_price: Option<f64>,
}

impl DividendRecord {
    /// At least one numeric field was recovered.
    pub fn has_any_field(&self) -> bool {
        self.cash_div.is_some() || self.stock_div.is_some() || self.avg_price.is_some()
    }
}

/// How an unrecovered field is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingValue {
    /// Write `0`, the historical contract of the endpoint.
    #[default]
    Zero,
    Null,
}

/// Wire form of a [`DividendRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendItem {
    pub year: i32,
    pub cash_div: Option<f64>,
    pub stock_div: Option<f64>,
    pub avg_price: Option<f64>,
}

impl DividendItem {
    pub fn from_record(record: &DividendRecord, missing: MissingValue) -> Self {
        let fill = |v: Option<f64>| match missing {
            MissingValue::Zero => Some(v.unwrap_or(0.0)),
            MissingValue::Null => v,
        };
        Self {
            year: record.year,
            cash_div: fill(record.cash_div),
            stock_div: fill(record.stock_div),
            avg_price: fill(record.avg_price),
        }
    }
}
