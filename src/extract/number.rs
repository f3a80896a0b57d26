// src/extract/number.rs

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]+(\.[0-9]+)?").expect("number regex should compile"));

/// Parse noisy cell text (`"1,234.5"`, `"+3.00元"`, `"-"`) into a number.
///
/// Thousands separators are dropped, then the first signed integer or decimal
/// run is taken. Text without any digits is absent, never an error.
pub fn normalize_number(raw: Option<&str>) -> Option<f64> {
    let cleaned = raw?.replace(',', "");
    let s = cleaned.trim();
    if s.is_empty() {
        return None;
    }
    NUMBER_RE.find(s).and_then(|m| m.as_str().parse().ok())
}
