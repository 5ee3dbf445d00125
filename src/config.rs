//! Environment-driven runtime configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

const DEFAULT_MAX_BODY_BYTES: &str = "10485760";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_secret_key: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub app_env: String,
    pub chromium_path: Option<PathBuf>,
    pub pdf_timeout: Duration,
    /// Upper bound for report request bodies; PSI payloads embed base64 screenshots.
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> Result<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let api_secret_key = get_var("API_SECRET_KEY")?;
        if api_secret_key.trim().is_empty() {
            return Err(AppError::config("API_SECRET_KEY must not be empty"));
        }

        Ok(Self {
            api_secret_key,
            host: get_var_or("HOST", "0.0.0.0"),
            port: get_var_or("PORT", "3000")
                .parse()
                .map_err(|e| AppError::config(format!("invalid PORT: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            app_env: get_var_or("APP_ENV", "development"),
            chromium_path: env::var("CHROMIUM_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            pdf_timeout: Duration::from_secs(
                get_var_or("PDF_TIMEOUT_SECS", "30")
                    .parse()
                    .map_err(|e| AppError::config(format!("invalid PDF_TIMEOUT_SECS: {e}")))?,
            ),
            max_body_bytes: get_var_or("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)
                .parse()
                .map_err(|e| AppError::config(format!("invalid MAX_BODY_BYTES: {e}")))?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Error details are only exposed outside production.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn get_var(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AppError::config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
