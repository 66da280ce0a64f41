// GitHub API response types.
// Only the repository fields the portfolio renders are deserialized.

use serde::{Deserialize, Serialize};

/// A repository as listed by `GET /users/{account}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub html_url: String,
}

impl Repository {
    /// Homepage URL, treating GitHub's empty string as absent.
    pub fn homepage_url(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "id": 42,
            "name": "folio",
            "full_name": "JFMGDB/folio",
            "description": null,
            "homepage": "",
            "language": "Rust",
            "stargazers_count": 7,
            "forks_count": 1,
            "html_url": "https://github.com/JFMGDB/folio",
            "private": false
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, 42);
        assert_eq!(repo.description, None);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.homepage_url(), None);
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{
            "id": 1,
            "name": "bare",
            "stargazers_count": 0,
            "forks_count": 0,
            "html_url": "https://github.com/JFMGDB/bare"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(repo.homepage.is_none());
        assert!(repo.language.is_none());
    }
}
