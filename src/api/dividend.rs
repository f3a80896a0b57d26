use axum::extract::{RawQuery, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use url::form_urlencoded;

use super::error::ApiError;
use super::AppState;
use crate::extract::{extract_dividend_rows, DividendItem, ExtractOptions};
use crate::fetch::FetchError;

/// Query parameters of the dividend route. Parsed by hand so that repeated or
/// odd keys never bypass the JSON error bodies; the first occurrence wins.
#[derive(Debug, Default, PartialEq)]
pub struct DividendQuery {
    pub stock_id: Option<String>,
    /// `"1"` logs the first candidate rows; any other value is ignored.
    pub debug: Option<String>,
}

impl DividendQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut q = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match &*key {
                "stock_id" => &mut q.stock_id,
                "debug" => &mut q.debug,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        q
    }
}

#[derive(Debug, Serialize)]
pub struct DividendResponse {
    pub stock_id: String,
    /// Upstream URL the items were read from.
    pub source: String,
    pub items: Vec<DividendItem>,
}

pub async fn api_dividend(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<DividendResponse>, ApiError> {
    let q = DividendQuery::parse(raw.as_deref());
    let stock_id = q.stock_id.as_deref().unwrap_or_default().trim().to_string();
    if stock_id.is_empty() {
        return Err(ApiError::MissingStockId);
    }
    let debug = q.debug.as_deref() == Some("1");

    let page = match state.fetcher.fetch_stock(&stock_id).await {
        Ok(page) => page,
        Err(FetchError::Timeout(limit)) => {
            warn!(%stock_id, ?limit, "upstream timed out");
            return Err(ApiError::UpstreamTimeout { stock_id });
        }
        Err(e) => {
            error!(%stock_id, error = %e, "fetch failed");
            return Err(ApiError::FetchFailed { stock_id });
        }
    };

    let chars = page.body.chars().count();
    if chars < state.config.min_body_chars {
        warn!(%stock_id, chars, status = %page.status, "upstream body too short");
        return Err(ApiError::UpstreamTooShort { stock_id });
    }

    let opts = ExtractOptions {
        min_cells: state.config.min_row_cells,
        debug,
    };
    let page_url = page.url;
    let body = page.body;
    // the parsed DOM is not Send, so it lives entirely on the blocking pool
    let records = match tokio::task::spawn_blocking(move || extract_dividend_rows(&body, &opts)).await {
        Ok(records) => records,
        Err(e) => {
            error!(%stock_id, error = %e, "extraction task failed");
            return Err(ApiError::FetchFailed { stock_id });
        }
    };

    if records.is_empty() {
        warn!(%stock_id, "no dividend rows recovered");
        return Err(ApiError::NoRows { stock_id });
    }

    info!(%stock_id, items = records.len(), "dividend history served");
    let items = records
        .iter()
        .map(|r| DividendItem::from_record(r, state.config.missing))
        .collect();

    Ok(Json(DividendResponse {
        stock_id,
        source: page_url.to_string(),
        items,
    }))
}
