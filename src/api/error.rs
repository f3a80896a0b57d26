use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

const DEBUG_HINT: &str =
    "add &debug=1 to log the first candidate rows' cells, then adjust the column offsets";

/// Every way the dividend endpoint can fail, one variant per response class.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing stock_id")]
    MissingStockId,
    #[error("upstream returned too-short html (possibly blocked or asking for verification)")]
    UpstreamTooShort { stock_id: String },
    #[error("upstream timed out")]
    UpstreamTimeout { stock_id: String },
    #[error("parsed 0 rows (table layout may have changed, or the request was blocked)")]
    NoRows { stock_id: String },
    /// Details stay in the log; the caller only sees the generic message.
    #[error("fetch/parse failed")]
    FetchFailed { stock_id: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingStockId => StatusCode::BAD_REQUEST,
            Self::UpstreamTooShort { .. } | Self::UpstreamTimeout { .. } | Self::NoRows { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::FetchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let body = match &self {
            Self::MissingStockId => json!({ "error": error }),
            Self::NoRows { stock_id } => json!({
                "error": error,
                "stock_id": stock_id,
                "hint": DEBUG_HINT,
            }),
            Self::UpstreamTooShort { stock_id }
            | Self::UpstreamTimeout { stock_id }
            | Self::FetchFailed { stock_id } => json!({ "error": error, "stock_id": stock_id }),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}
