// Runtime configuration.
// Resolves the GitHub account, token, API base, and storage locations.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{EXPIRATION_WINDOW, paths};
use crate::github::client::{GITHUB_API_BASE, REQUEST_TIMEOUT};

/// Account shown when none is configured.
pub const DEFAULT_ACCOUNT: &str = "JFMGDB";

/// Environment variable naming the GitHub account.
pub const ACCOUNT_ENV: &str = "FOLIO_GITHUB_USERNAME";

#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub login whose repositories are listed.
    pub account: String,
    /// Optional token, raises the API rate limit.
    pub token: Option<String>,
    pub api_base: String,
    pub request_timeout: Duration,
    pub expiration_window: Duration,
    /// `None` keeps the cache in memory only.
    pub cache_dir: Option<PathBuf>,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: DEFAULT_ACCOUNT.to_string(),
            token: None,
            api_base: GITHUB_API_BASE.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            expiration_window: EXPIRATION_WINDOW,
            cache_dir: paths::cache_dir(),
            log_dir: paths::log_dir(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `FOLIO_GITHUB_USERNAME` and `GITHUB_TOKEN`.
    pub fn from_env() -> Self {
        Self {
            account: account_or_default(std::env::var(ACCOUNT_ENV).ok()),
            token: non_empty(std::env::var("GITHUB_TOKEN").ok()),
            ..Self::default()
        }
    }
}

/// Use the configured account unless it is missing or blank.
pub fn account_or_default(value: Option<String>) -> String {
    non_empty(value).unwrap_or_else(|| DEFAULT_ACCOUNT.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
