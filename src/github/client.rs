// GitHub API HTTP client.
// Handles default headers, the request timeout, and response classification.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FetchError, FolioError, Result};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Upper bound on a single request, connection included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub API client. Cheap to share behind an `Arc`; requests take `&self`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client for api.github.com, optionally authenticated.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_options(GITHUB_API_BASE, token, REQUEST_TIMEOUT)
    }

    /// Create a client against a custom base URL and timeout.
    pub fn with_options(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| FolioError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request with query parameters.
    ///
    /// `account` only feeds the `NotFound` message.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
        account: &str,
    ) -> std::result::Result<Response, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, %url, "request failed without a response");
                FetchError::from_transport(&e)
            })?;

        check_response(response, account)
    }
}

/// Check response status and convert errors.
fn check_response(response: Response, account: &str) -> std::result::Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    tracing::debug!(%status, url = %response.url(), "GitHub returned an error status");

    let reset_at = response
        .headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok());

    Err(classify_status(status, account, reset_at))
}

/// Map a non-2xx status to the fetch error taxonomy.
pub fn classify_status(status: StatusCode, account: &str, reset_epoch: Option<i64>) -> FetchError {
    match status {
        StatusCode::FORBIDDEN => {
            let reset_at = reset_epoch
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.format("%H:%M:%S").to_string());
            FetchError::RateLimited { reset_at }
        }
        StatusCode::NOT_FOUND => FetchError::NotFound(account.to_string()),
        status => FetchError::Http(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_is_rate_limited() {
        let err = classify_status(StatusCode::FORBIDDEN, "octocat", Some(0));
        assert_eq!(
            err,
            FetchError::RateLimited {
                reset_at: Some("00:00:00".to_string())
            }
        );

        let err = classify_status(StatusCode::FORBIDDEN, "octocat", None);
        assert_eq!(err, FetchError::RateLimited { reset_at: None });
    }

    #[test]
    fn test_not_found_keeps_account() {
        let err = classify_status(StatusCode::NOT_FOUND, "ghost", None);
        assert_eq!(err, FetchError::NotFound("ghost".to_string()));
    }

    #[test]
    fn test_other_statuses_are_http_errors() {
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "a", None),
            FetchError::Http(500)
        );
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED, "a", None),
            FetchError::Http(401)
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            GitHubClient::with_options("http://localhost:1/", None, REQUEST_TIMEOUT).unwrap();
        assert_eq!(client.base_url, "http://localhost:1");
    }
}
