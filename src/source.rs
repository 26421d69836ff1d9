use async_trait::async_trait;
use crate::{
    error::Result,
    types::{ContentsBody, Repository},
};

/// Core abstraction over a source-hosting backend
///
/// Implementors provide read-only access to repository listings. The
/// fetcher layer depends only on this trait, so tests can substitute an
/// in-memory source for the real API.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Fetch the top-level contents listing of a repository
    ///
    /// Returns `FetchError::NotFound` if the repository doesn't exist or
    /// is not accessible, `FetchError::AuthRejected` on a credential
    /// failure
    async fn repo_contents(&self, owner: &str, repo: &str) -> Result<ContentsBody>;

    /// List the public repositories belonging to a user
    async fn user_repos(&self, user: &str) -> Result<Vec<Repository>>;

    /// Get a human-readable identifier for this source (for logging/debugging)
    fn identifier(&self) -> String;
}
