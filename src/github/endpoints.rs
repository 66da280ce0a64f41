// GitHub API endpoint functions.
// The portfolio only ever lists one account's repositories.

use crate::error::FetchError;

use super::RepoSource;
use super::client::GitHubClient;
use super::types::Repository;

/// Only the most recently updated repositories are ever listed.
pub const REPOS_PER_PAGE: u32 = 20;

impl GitHubClient {
    /// Get an account's repositories, most recently updated first.
    ///
    /// The server's ordering is returned untouched.
    pub async fn list_user_repos(&self, account: &str) -> Result<Vec<Repository>, FetchError> {
        let account = account.trim();
        if account.is_empty() {
            return Err(FetchError::Unexpected);
        }

        let params = [
            ("type", "all"),
            ("sort", "updated"),
            ("direction", "desc"),
            ("per_page", &REPOS_PER_PAGE.to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", account), &params, account)
            .await?;

        response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "could not read repository list");
            FetchError::from_transport(&e)
        })
    }
}

impl RepoSource for GitHubClient {
    async fn fetch_repositories(&self, account: &str) -> Result<Vec<Repository>, FetchError> {
        self.list_user_repos(account).await
    }
}
