// Error types for folio.
// Splits fetch failures shown to the user from setup and persistence errors.

use thiserror::Error;

/// Why a repository fetch failed.
///
/// The `Display` text is what the repository screen shows when there is no
/// cached data to fall back on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("GitHub API rate limit exceeded{}, try again later", reset_suffix(.reset_at))]
    RateLimited { reset_at: Option<String> },

    #[error("GitHub user \"{0}\" not found")]
    NotFound(String),

    #[error("Failed to fetch repositories: HTTP {0}")]
    Http(u16),

    #[error("Could not connect to GitHub, check your network and try again")]
    Network,

    #[error("An unexpected error occurred while fetching repositories")]
    Unexpected,
}

fn reset_suffix(reset_at: &Option<String>) -> String {
    reset_at
        .as_ref()
        .map(|at| format!(" (resets at {} UTC)", at))
        .unwrap_or_default()
}

impl FetchError {
    /// Classify a transport-level reqwest failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            FetchError::Network
        } else {
            FetchError::Unexpected
        }
    }
}

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
