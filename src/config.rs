use std::env;
use std::time::Duration;

use crate::extract::{MissingValue, MIN_ROW_CELLS};

pub const DEFAULT_UPSTREAM_URL: &str = "https://goodinfo.tw/tw/StockDividendPolicy.asp";

/// Server configuration derived from `DIVSCRAPER_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,

    // ── Upstream ───────────────────────────────────────────────────
    pub upstream_url: String,
    /// Minimum spacing between the starts of two outbound fetches.
    pub min_spacing: Duration,
    pub fetch_timeout: Duration,
    /// Shorter bodies are treated as a block or challenge page.
    pub min_body_chars: usize,

    // ── Extraction ─────────────────────────────────────────────────
    pub min_row_cells: usize,
    pub missing: MissingValue,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8787,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            min_spacing: Duration::from_millis(600),
            fetch_timeout: Duration::from_secs(20),
            min_body_chars: 5000,
            min_row_cells: MIN_ROW_CELLS,
            missing: MissingValue::Zero,
        }
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "on"))
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        let missing = if env_bool("DIVSCRAPER_MISSING_AS_NULL", false) {
            MissingValue::Null
        } else {
            MissingValue::Zero
        };

        Self {
            bind: env_str("DIVSCRAPER_BIND", &d.bind),
            port: env_parse("DIVSCRAPER_PORT", d.port),
            upstream_url: env_str("DIVSCRAPER_UPSTREAM_URL", &d.upstream_url),
            min_spacing: Duration::from_millis(env_parse(
                "DIVSCRAPER_MIN_SPACING_MS",
                d.min_spacing.as_millis() as u64,
            )),
            fetch_timeout: Duration::from_secs(env_parse(
                "DIVSCRAPER_TIMEOUT_SECS",
                d.fetch_timeout.as_secs(),
            ))
            .max(Duration::from_secs(1)),
            min_body_chars: env_parse("DIVSCRAPER_MIN_BODY_CHARS", d.min_body_chars),
            min_row_cells: env_parse("DIVSCRAPER_MIN_ROW_CELLS", d.min_row_cells),
            missing,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_service() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8787);
        assert_eq!(cfg.min_spacing, Duration::from_millis(600));
        assert_eq!(cfg.min_body_chars, 5000);
        assert_eq!(cfg.min_row_cells, 10);
        assert_eq!(cfg.missing, MissingValue::Zero);
        assert_eq!(cfg.addr(), "0.0.0.0:8787");
    }

    #[test]
    fn unset_or_invalid_env_falls_back() {
        assert_eq!(env_parse("DIVSCRAPER_TEST_UNSET_VAR", 42u16), 42);
        std::env::set_var("DIVSCRAPER_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_parse("DIVSCRAPER_TEST_BAD_PORT", 8787u16), 8787);
        std::env::set_var("DIVSCRAPER_TEST_FLAG", " Yes ");
        assert!(env_bool("DIVSCRAPER_TEST_FLAG", false));
        std::env::set_var("DIVSCRAPER_TEST_BLANK", "   ");
        assert_eq!(env_str("DIVSCRAPER_TEST_BLANK", "fallback"), "fallback");
    }
}
