use divscraper::extract::{extract_dividend_rows, ExtractOptions};

fn tr(cells: &[&str]) -> String {
    let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
    format!("<tr>{tds}</tr>\n")
}

/// Dividend policy page: a year picker, the history table nested in a layout
/// table, header and cumulative rows, and a row with nothing recoverable.
fn policy_page() -> String {
    let mut history = String::new();
    history.push_str(&tr(&[
        "股利發放年度", "現金股利 盈餘", "公積", "合計", "現金合計", "股票股利 盈餘", "公積", "股票合計",
        "股利合計", "填息", "股價年度", "年均",
    ]));
    // no separator: price year sits in the back half instead
    history.push_str(&tr(&[
        "2023", "3.0", "0", "3.0", "11.0", "0", "0", "0.5", "11.5", "8", "2023", "548.5", "593", "457",
    ]));
    history.push_str(&tr(&[
        "2024", "4.50", "4.50", "0", "13.5", "0", "0", "0", "13.5", "--", "2024", "1,020.5", "1,080", "968",
    ]));
    history.push_str(&tr(&["2019", "-", "-", "-", "-", "-", "-", "-", "-", "-"]));
    history.push_str(&tr(&[
        "2020", "2.5", "0", "2.5", "10", "0", "0", "0", "10", "--", "2020", "294.7",
    ]));
    history.push_str(&tr(&["累計", "99", "0", "99", "99", "0", "0", "0", "99", "--", "-", "-"]));

    format!(
        r#"<html><body>
<table class="nav"><tr><td>2024</td><td>2023</td><td>2022</td></tr></table>
<table class="layout"><tr><td>
  <table id="tblDetail">{history}</table>
</td><td>side</td></tr></table>
</body></html>"#
    )
}

#[test]
fn recovers_history_from_policy_page() {
    let items = extract_dividend_rows(&policy_page(), &ExtractOptions::default());

    let years: Vec<i32> = items.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2024, 2023, 2020]);

    let y2024 = &items[0];
    assert_eq!(y2024.cash_div, Some(13.5));
    assert_eq!(y2024.stock_div, Some(0.0));
    assert_eq!(y2024.avg_price, Some(1020.5));

    let y2023 = &items[1];
    assert_eq!(y2023.cash_div, Some(11.0));
    assert_eq!(y2023.stock_div, Some(0.5));
    assert_eq!(y2023.avg_price, Some(548.5));

    assert_eq!(items[2].avg_price, Some(294.7));
}

#[test]
fn debug_mode_does_not_change_output() {
    let quiet = extract_dividend_rows(&policy_page(), &ExtractOptions::default());
    let loud = extract_dividend_rows(
        &policy_page(),
        &ExtractOptions {
            debug: true,
            ..ExtractOptions::default()
        },
    );
    assert_eq!(quiet, loud);
}

#[test]
fn pages_without_history_yield_nothing() {
    let html = "<html><body><p>請稍候，系統正在驗證您的瀏覽器</p></body></html>";
    assert!(extract_dividend_rows(html, &ExtractOptions::default()).is_empty());
}
