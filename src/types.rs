use serde::{Deserialize, Serialize};

/// One item of a repository contents listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Path relative to the repository root, unique within one listing
    pub path: String,
    /// Type of entry
    pub entry_type: EntryType,
}

/// Type of contents entry
///
/// The remote API reports the type as a free-form string; anything other
/// than `"file"` or `"dir"` is kept as `Unknown` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Unknown,
}

/// Parsed body of a successful contents request
///
/// The API returns a JSON array for a directory, but a bare object for a
/// single-file path and other shapes for edge cases (empty repository).
#[derive(Debug, Clone)]
pub enum ContentsBody {
    Entries(Vec<ContentEntry>),
    NotAList,
}

/// Outcome of one contents fetch
///
/// Exactly one variant per call. Every failure mode is carried as data,
/// never as a propagated error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingResult {
    /// Entries of the listing filtered to directories, source order kept
    Directories(Vec<ContentEntry>),
    /// Body parsed but was not a sequence (empty repo, single-file path)
    EmptyOrUnexpected,
    /// Remote rejected the configured credentials
    AuthError,
    /// Repository absent, or private without access
    NotFound,
    /// Any other non-success status, or a transport fault
    ApiError(String),
    /// Success status but the body was not valid JSON
    ParseError,
}

impl ListingResult {
    /// Short label for diagnostics
    pub fn classification(&self) -> &'static str {
        match self {
            ListingResult::Directories(_) => "directories",
            ListingResult::EmptyOrUnexpected => "empty-or-unexpected",
            ListingResult::AuthError => "auth-error",
            ListingResult::NotFound => "not-found",
            ListingResult::ApiError(_) => "api-error",
            ListingResult::ParseError => "parse-error",
        }
    }
}

/// Repository metadata as listed on the repository index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
}

/// Keep only directory entries, preserving their relative order
pub fn directories(entries: Vec<ContentEntry>) -> Vec<ContentEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.entry_type == EntryType::Dir)
        .collect()
}
