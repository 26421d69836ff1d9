use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::{FetchError, Result},
    source::RepoSource,
    types::{self, ContentsBody, ListingResult, Repository},
};

/// Fetches and classifies repository contents listings
///
/// Every failure path comes back as a `ListingResult` variant, never as
/// an error. Each invocation owns its whole request/response lifecycle;
/// nothing is shared or deduplicated across calls.
pub struct ContentsFetcher {
    source: Arc<dyn RepoSource>,
}

impl ContentsFetcher {
    /// Create a new fetcher over the given source
    pub fn new(source: Arc<dyn RepoSource>) -> Self {
        Self { source }
    }

    /// Fetch the top-level directory entries of a repository
    ///
    /// Returns `Directories` with the listing filtered to directories in
    /// source order, or the variant describing why no listing could be
    /// produced. Emits one diagnostic log line per non-success outcome.
    pub async fn fetch(&self, owner: &str, repo: &str) -> ListingResult {
        let outcome = match self.source.repo_contents(owner, repo).await {
            Ok(ContentsBody::Entries(entries)) => {
                ListingResult::Directories(types::directories(entries))
            }
            Ok(ContentsBody::NotAList) => ListingResult::EmptyOrUnexpected,
            Err(err) => classify(err),
        };

        match &outcome {
            ListingResult::Directories(dirs) => {
                debug!(
                    owner,
                    repo,
                    count = dirs.len(),
                    source = %self.source.identifier(),
                    "listed repository directories"
                );
            }
            other => {
                warn!(
                    owner,
                    repo,
                    classification = other.classification(),
                    source = %self.source.identifier(),
                    "contents fetch produced no directories"
                );
            }
        }

        outcome
    }

    /// List the repositories belonging to a user, in API order
    pub async fn repositories(&self, user: &str) -> Result<Vec<Repository>> {
        match self.source.user_repos(user).await {
            Ok(repos) => {
                debug!(user, count = repos.len(), "listed user repositories");
                Ok(repos)
            }
            Err(err) => {
                warn!(user, error = %err, "repository index fetch failed");
                Err(err)
            }
        }
    }
}

/// Resolve a fetch error into the outcome the renderer sees
///
/// Transport faults map to `ApiError` with a generic message.
fn classify(err: FetchError) -> ListingResult {
    match err {
        FetchError::AuthRejected => ListingResult::AuthError,
        FetchError::NotFound { .. } => ListingResult::NotFound,
        FetchError::Api { message } => ListingResult::ApiError(message),
        FetchError::Parse => ListingResult::ParseError,
        FetchError::Network(_) => {
            ListingResult::ApiError("network error while contacting the remote API".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentEntry, EntryType};
    use async_trait::async_trait;

    enum Canned {
        Contents(ContentsBody),
        Failure(fn() -> FetchError),
    }

    struct MockSource {
        canned: Canned,
    }

    #[async_trait]
    impl RepoSource for MockSource {
        async fn repo_contents(&self, _owner: &str, _repo: &str) -> Result<ContentsBody> {
            match &self.canned {
                Canned::Contents(body) => Ok(body.clone()),
                Canned::Failure(make) => Err(make()),
            }
        }

        async fn user_repos(&self, user: &str) -> Result<Vec<Repository>> {
            match &self.canned {
                Canned::Failure(make) => Err(make()),
                Canned::Contents(_) => Err(FetchError::NotFound {
                    path: user.to_string(),
                }),
            }
        }

        fn identifier(&self) -> String {
            "mock".to_string()
        }
    }

    fn fetcher_with(canned: Canned) -> ContentsFetcher {
        ContentsFetcher::new(Arc::new(MockSource { canned }))
    }

    fn entry(path: &str, entry_type: EntryType) -> ContentEntry {
        ContentEntry {
            path: path.to_string(),
            entry_type,
        }
    }

    #[tokio::test]
    async fn test_fetch_filters_directories() {
        let fetcher = fetcher_with(Canned::Contents(ContentsBody::Entries(vec![
            entry("src", EntryType::Dir),
            entry("readme.md", EntryType::File),
        ])));

        let result = fetcher.fetch("owner", "repo").await;

        assert_eq!(
            result,
            ListingResult::Directories(vec![entry("src", EntryType::Dir)])
        );
    }

    #[tokio::test]
    async fn test_fetch_not_a_list() {
        let fetcher = fetcher_with(Canned::Contents(ContentsBody::NotAList));
        assert_eq!(
            fetcher.fetch("owner", "repo").await,
            ListingResult::EmptyOrUnexpected
        );
    }

    #[tokio::test]
    async fn test_fetch_classifies_auth_failure() {
        let fetcher = fetcher_with(Canned::Failure(|| FetchError::AuthRejected));
        assert_eq!(fetcher.fetch("owner", "repo").await, ListingResult::AuthError);
    }

    #[tokio::test]
    async fn test_fetch_classifies_not_found() {
        let fetcher = fetcher_with(Canned::Failure(|| FetchError::NotFound {
            path: "owner/repo".to_string(),
        }));
        assert_eq!(fetcher.fetch("owner", "repo").await, ListingResult::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_carries_api_message() {
        let fetcher = fetcher_with(Canned::Failure(|| FetchError::Api {
            message: "API rate limit exceeded".to_string(),
        }));
        assert_eq!(
            fetcher.fetch("owner", "repo").await,
            ListingResult::ApiError("API rate limit exceeded".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_classifies_parse_failure() {
        let fetcher = fetcher_with(Canned::Failure(|| FetchError::Parse));
        assert_eq!(fetcher.fetch("owner", "repo").await, ListingResult::ParseError);
    }

    #[tokio::test]
    async fn test_fetch_is_idempotent() {
        let fetcher = fetcher_with(Canned::Contents(ContentsBody::Entries(vec![
            entry("docs", EntryType::Dir),
            entry("src", EntryType::Dir),
            entry("main.rs", EntryType::File),
        ])));

        let first = fetcher.fetch("owner", "repo").await;
        let second = fetcher.fetch("owner", "repo").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_repositories_propagates_error() {
        let fetcher = fetcher_with(Canned::Failure(|| FetchError::AuthRejected));
        assert!(matches!(
            fetcher.repositories("someone").await,
            Err(FetchError::AuthRejected)
        ));
    }
}
