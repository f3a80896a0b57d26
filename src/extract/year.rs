// src/extract/year.rs

/// True iff the trimmed text is exactly four ASCII digits.
pub fn is_year_token(s: &str) -> bool {
    let s = s.trim();
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}
