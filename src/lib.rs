pub mod api;
pub mod config;
pub mod extract;
pub mod fetch;

pub use config::ServerConfig;
pub use extract::{extract_dividend_rows, DividendRecord, ExtractOptions};
