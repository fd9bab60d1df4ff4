use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::layout::DEFAULT_PAGE_BUDGET_PX;
use crate::session::SessionSettings;

/// Builder configuration loaded from environment variables.
/// Every variable has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub document_path: Option<PathBuf>,
    pub template_id: String,
    pub output_path: PathBuf,
    pub page_budget_px: f32,
    pub overflow_debounce_ms: u64,
    pub export_settle_ms: u64,
    pub max_layout_cycles: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            document_path: std::env::var("CV_DOCUMENT_PATH").ok().map(PathBuf::from),
            template_id: std::env::var("CV_TEMPLATE").unwrap_or_else(|_| "modern".to_string()),
            output_path: std::env::var("CV_OUTPUT_PATH")
                .unwrap_or_else(|_| "cv.pdf".to_string())
                .into(),
            page_budget_px: parse_env("CV_PAGE_BUDGET_PX", DEFAULT_PAGE_BUDGET_PX)?,
            overflow_debounce_ms: parse_env("CV_OVERFLOW_DEBOUNCE_MS", 300)?,
            export_settle_ms: parse_env("CV_EXPORT_SETTLE_MS", 500)?,
            max_layout_cycles: parse_env("CV_MAX_LAYOUT_CYCLES", 8)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            page_budget_px: self.page_budget_px,
            overflow_debounce: Duration::from_millis(self.overflow_debounce_ms),
            export_settle: Duration::from_millis(self.export_settle_ms),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let v: u64 = parse_env("CV_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(v, 42);
    }

    #[test]
    fn test_parse_env_reports_key_on_bad_value() {
        std::env::set_var("CV_TEST_BAD_NUMBER", "fast");
        let err = parse_env::<u64>("CV_TEST_BAD_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("CV_TEST_BAD_NUMBER"));
    }

    #[test]
    fn test_session_settings_convert_millis() {
        let config = Config {
            document_path: None,
            template_id: "modern".into(),
            output_path: "cv.pdf".into(),
            page_budget_px: 900.0,
            overflow_debounce_ms: 250,
            export_settle_ms: 10,
            max_layout_cycles: 3,
            rust_log: "info".into(),
        };
        let s = config.session_settings();
        assert_eq!(s.page_budget_px, 900.0);
        assert_eq!(s.overflow_debounce, Duration::from_millis(250));
        assert_eq!(s.export_settle, Duration::from_millis(10));
    }
}
