// src/extract/rows.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use super::year::is_year_token;

/// Minimum non-empty cell count of a dividend-history row. Navigation and
/// summary tables on the same page are narrower than this.
pub const MIN_ROW_CELLS: usize = 10;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("CSS selector for table rows should be valid"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("CSS selector for table cells should be valid"));

/// Text of one cell with whitespace runs collapsed to a single space.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Non-empty cell texts of a row, in column order.
pub fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL_SELECTOR)
        .map(cell_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Collect every table row that looks like a dividend-history entry: at least
/// `min_cells` non-empty cells, the first one a year token. Document order is kept.
pub fn select_candidate_rows(doc: &Html, min_cells: usize) -> Vec<Vec<String>> {
    let mut scanned = 0usize;
    let candidates: Vec<Vec<String>> = doc
        .select(&ROW_SELECTOR)
        .inspect(|_| scanned += 1)
        .map(row_cells)
        .filter(|cells| {
            let keep = cells.len() >= min_cells && cells.first().is_some_and(|c| is_year_token(c));
            if !keep {
                if let Some(first) = cells.first() {
                    trace!(cells = cells.len(), first = %first, "row rejected");
                }
            }
            keep
        })
        .collect();

    debug!(scanned, candidates = candidates.len(), "selected candidate rows");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[Vec<&str>]) -> Html {
        let mut html = String::from("<html><body><table>");
        for row in rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{cell}</td>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table></body></html>");
        Html::parse_document(&html)
    }

    fn numbered(first: &str, len: usize) -> Vec<&str> {
        let mut row = vec![first];
        row.extend(std::iter::repeat("1.0").take(len - 1));
        row
    }

    #[test]
    fn rejects_rows_below_cell_threshold() {
        let doc = table(&[numbered("2022", 9)]);
        assert!(select_candidate_rows(&doc, MIN_ROW_CELLS).is_empty());
    }

    #[test]
    fn accepts_wide_row_led_by_year() {
        let doc = table(&[numbered("2022", 10), numbered("2021", 14)]);
        let rows = select_candidate_rows(&doc, MIN_ROW_CELLS);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "2022");
        assert_eq!(rows[1].len(), 14);
    }

    #[test]
    fn rejects_rows_not_led_by_year() {
        let doc = table(&[numbered("abc", 12), numbered("股利發放年度", 12)]);
        assert!(select_candidate_rows(&doc, MIN_ROW_CELLS).is_empty());
    }

    #[test]
    fn empty_cells_do_not_count() {
        let mut row = numbered("2022", 9);
        row.extend(["", " ", "&nbsp;"]);
        let doc = table(&[row]);
        assert!(select_candidate_rows(&doc, MIN_ROW_CELLS).is_empty());
    }

    #[test]
    fn collapses_whitespace_and_nested_markup() {
        let doc = Html::parse_document(
            "<table><tr><td>\n 2023 \n</td><td><b>1,000</b>\t<i>股</i></td>\
             <td>a</td><td>b</td><td>c</td><td>d</td><td>e</td><td>f</td><td>g</td><td>h</td></tr></table>",
        );
        let rows = select_candidate_rows(&doc, MIN_ROW_CELLS);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "2023");
        assert_eq!(rows[0][1], "1,000 股");
    }

    #[test]
    fn threshold_is_tunable() {
        let doc = table(&[numbered("2022", 6)]);
        assert!(select_candidate_rows(&doc, MIN_ROW_CELLS).is_empty());
        assert_eq!(select_candidate_rows(&doc, 6).len(), 1);
    }
}
