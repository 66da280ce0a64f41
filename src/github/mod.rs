// GitHub API module.
// Provides the client, repository type, and the fetch seam used by the cache.

pub mod client;
pub mod endpoints;
pub mod types;

use std::future::Future;

use crate::error::FetchError;

pub use client::GitHubClient;
pub use types::Repository;

/// Where the repository cache gets fresh data from.
///
/// One call is one outbound request; no retries.
pub trait RepoSource: Send + Sync + 'static {
    fn fetch_repositories(
        &self,
        account: &str,
    ) -> impl Future<Output = Result<Vec<Repository>, FetchError>> + Send;
}
