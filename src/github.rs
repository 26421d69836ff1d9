use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::{
    error::{FetchError, Result},
    source::RepoSource,
    types::{ContentEntry, ContentsBody, EntryType, Repository},
};

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub-backed repository source
///
/// Talks to the GitHub REST API:
/// - `/repos/{owner}/{repo}/contents` for contents listings
/// - `/users/{user}/repos` for the repository index
#[derive(Clone)]
pub struct GitHubSource {
    client: Client,
    api_base: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct GitHubApiEntry {
    #[serde(default)]
    path: String,
    #[serde(rename = "type", default)]
    entry_type: String,
}

#[derive(Deserialize)]
struct GitHubApiError {
    message: Option<String>,
}

impl GitHubSource {
    /// Create a new GitHub source against the public API
    ///
    /// # Arguments
    /// * `token` - Access token for the `Authorization` header; `None`
    ///   sends requests unauthenticated
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_base(DEFAULT_API_BASE, token)
    }

    /// Create a source against a custom API base URL
    ///
    /// Used by tests to point the source at a local server.
    pub fn with_api_base(api_base: impl Into<String>, token: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent("repo-contents/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_base: api_base.into(),
            token,
        }
    }

    /// Create a source with the token read from `GITHUB_ACCESS_TOKEN`
    ///
    /// The environment is read once, here; a missing variable means
    /// unauthenticated requests, surfacing as `AuthRejected` or a rate
    /// limit only when the remote enforces it.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GITHUB_ACCESS_TOKEN").ok())
    }

    /// Build the API URL for a contents listing
    fn contents_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/contents", self.api_base, owner, repo)
    }

    /// Build the API URL for a user's repository index
    fn repos_url(&self, user: &str) -> String {
        format!("{}/users/{}/repos", self.api_base, user)
    }

    /// Issue a GET with the standard headers, attaching the token if set
    async fn send(&self, url: &str) -> Result<Response> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        Ok(request.send().await?)
    }

    /// Map a non-success response onto the error taxonomy
    ///
    /// 401 and 404 classify on status alone. For anything else the body
    /// is read as `{"message": ...}`, falling back to the status line
    /// text when the body doesn't cooperate.
    async fn classify_failure(&self, path: &str, response: Response) -> FetchError {
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => FetchError::AuthRejected,
            StatusCode::NOT_FOUND => FetchError::NotFound {
                path: path.to_string(),
            },
            _ => {
                let fallback = status_line(status);
                let message = match response.json::<GitHubApiError>().await {
                    Ok(body) => body.message.unwrap_or(fallback),
                    Err(_) => fallback,
                };
                FetchError::Api { message }
            }
        }
    }
}

/// Status line text, e.g. "Forbidden" for 403
fn status_line(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

/// Convert one raw listing element into a `ContentEntry`
///
/// Elements that aren't objects are dropped; missing fields default to
/// empty strings, which never match a directory.
fn parse_entry(item: serde_json::Value) -> Option<ContentEntry> {
    let raw: GitHubApiEntry = serde_json::from_value(item).ok()?;
    Some(ContentEntry {
        path: raw.path,
        entry_type: match raw.entry_type.as_str() {
            "file" => EntryType::File,
            "dir" => EntryType::Dir,
            _ => EntryType::Unknown,
        },
    })
}

#[async_trait]
impl RepoSource for GitHubSource {
    async fn repo_contents(&self, owner: &str, repo: &str) -> Result<ContentsBody> {
        let url = self.contents_url(owner, repo);
        let response = self.send(&url).await?;

        if !response.status().is_success() {
            let path = format!("{}/{}", owner, repo);
            return Err(self.classify_failure(&path, response).await);
        }

        let text = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|_| FetchError::Parse)?;

        match value {
            serde_json::Value::Array(items) => {
                let entries = items.into_iter().filter_map(parse_entry).collect();
                Ok(ContentsBody::Entries(entries))
            }
            _ => Ok(ContentsBody::NotAList),
        }
    }

    async fn user_repos(&self, user: &str) -> Result<Vec<Repository>> {
        let url = self.repos_url(user);
        let response = self.send(&url).await?;

        if !response.status().is_success() {
            return Err(self.classify_failure(user, response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|_| FetchError::Parse)
    }

    fn identifier(&self) -> String {
        let host = self
            .api_base
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("github://{}", host)
    }
}
