// The persisted repository cache slot.
// A timestamp plus the full repository list, stored as JSON under one key.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::Repository;

/// Storage key of the single slot.
pub const CACHE_KEY: &str = "github_repos_cache_v1";

/// How long a slot is trusted without revalidation.
pub const EXPIRATION_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Last successful fetch. Always replaced whole, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSlot {
    /// Milliseconds since the Unix epoch at which the fetch completed.
    pub timestamp: i64,
    /// Repositories in server order.
    pub repos: Vec<Repository>,
}

impl CacheSlot {
    pub fn new(fetched_at: DateTime<Utc>, repos: Vec<Repository>) -> Self {
        Self {
            timestamp: fetched_at.timestamp_millis(),
            repos,
        }
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Whether the slot is younger than `window` at `now`.
    ///
    /// A timestamp in the future counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let age_ms = now.timestamp_millis().saturating_sub(self.timestamp);
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
        age_ms < window_ms
    }

    pub fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
