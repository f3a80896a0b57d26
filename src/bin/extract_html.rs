// src/bin/extract_html.rs
use anyhow::Result;
use clap::Parser;
use divscraper::extract::{extract_from_file, DividendItem, ExtractOptions, MissingValue, MIN_ROW_CELLS};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "extract-html")]
#[command(about = "Run the dividend table extraction over a saved HTML page and print JSON items")]
struct Args {
    /// Saved StockDividendPolicy page
    html_file: PathBuf,

    /// Log the first candidate rows and which price strategy matched
    #[arg(short, long)]
    debug: bool,

    /// Minimum non-empty cells for a row to count as a candidate
    #[arg(long, default_value_t = MIN_ROW_CELLS)]
    min_cells: usize,

    /// Emit null instead of 0 for fields that could not be recovered
    #[arg(long)]
    missing_as_null: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = ExtractOptions {
        min_cells: args.min_cells,
        debug: args.debug,
    };
    let missing = if args.missing_as_null {
        MissingValue::Null
    } else {
        MissingValue::Zero
    };

    let records = extract_from_file(&args.html_file, &opts)?;
    info!(file = %args.html_file.display(), items = records.len(), "extracted");

    let items: Vec<DividendItem> = records
        .iter()
        .map(|r| DividendItem::from_record(r, missing))
        .collect();
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
