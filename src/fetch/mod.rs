// src/fetch/mod.rs

pub mod throttle;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

pub use throttle::Throttle;

/// The upstream varies its markup by these headers; a bare client gets a
/// different (usually empty) page.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const ACCEPT_LANGUAGE_VALUE: &str = "zh-TW,zh;q=0.9,en;q=0.8";
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml";

const STOCK_ID_PARAM: &str = "STOCK_ID";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("throttle task is gone")]
    ThrottleClosed,
}

/// Raw upstream answer. The status is informational only; the body is
/// judged by the caller.
#[derive(Debug)]
pub struct Page {
    pub url: Url,
    pub status: StatusCode,
    pub body: String,
}

/// Fetches dividend pages one at a time through the courtesy throttle.
pub struct PageFetcher {
    client: Client,
    throttle: Throttle,
    base: Url,
    timeout: Duration,
}

impl PageFetcher {
    /// Build the client and spawn the throttle task; needs a tokio runtime.
    pub fn new(base_url: &str, spacing: Duration, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("parsing upstream URL {}", base_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            throttle: Throttle::spawn(spacing),
            base,
            timeout,
        })
    }

    /// Upstream page for `stock_id`, with the id form-encoded into the query.
    pub fn page_url(&self, stock_id: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair(STOCK_ID_PARAM, stock_id);
        url
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(e)
        }
    }

    /// Wait for the throttle, then GET `url` and read the whole body.
    #[instrument(level = "info", skip(self, url), fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        self.throttle.acquire().await?;

        let start = Instant::now();
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "upstream returned non-success status");
        }

        let body = resp.text().await.map_err(|e| self.classify(e))?;
        info!(%status, bytes = body.len(), elapsed = ?start.elapsed(), "fetched page");

        Ok(Page {
            url: url.clone(),
            status,
            body,
        })
    }

    pub async fn fetch_stock(&self, stock_id: &str) -> Result<Page, FetchError> {
        let url = self.page_url(stock_id);
        self.fetch(&url).await
    }
}
