use crate::types::{ListingResult, Repository};

/// A single outbound link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Framework-neutral description of what a page should show
///
/// The site template maps each variant onto its own markup; this module
/// only decides what the fragment says, never how it looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A heading plus one link per entry
    LinkList { heading: String, links: Vec<Link> },
    /// An informational line, not an error
    Notice(String),
    /// A user-visible error line
    Error(String),
    /// The surrounding router should serve its not-found page
    NotFoundPage,
}

/// Authentication state of the current visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    SignedIn,
    SignedOut,
}

/// Build the outbound link for one directory of a repository
pub fn tree_url(owner: &str, repo: &str, path: &str) -> String {
    format!("https://github.com/{}/{}/tree/master/{}", owner, repo, path)
}

/// Map a listing outcome onto the fragment the repository page shows
///
/// Exactly one fragment per variant. No retry guidance is offered; a
/// transient failure requires the user to reload.
pub fn render_listing(owner: &str, repo: &str, result: &ListingResult) -> Fragment {
    match result {
        ListingResult::Directories(dirs) => Fragment::LinkList {
            heading: format!("Directories ({})", dirs.len()),
            links: dirs
                .iter()
                .map(|dir| Link {
                    label: dir.path.clone(),
                    href: tree_url(owner, repo, &dir.path),
                })
                .collect(),
        },
        ListingResult::EmptyOrUnexpected => Fragment::Notice(
            "This repository is empty or returned unexpected data.".to_string(),
        ),
        ListingResult::AuthError => Fragment::Error(
            "Authentication error: check the configured access token.".to_string(),
        ),
        ListingResult::NotFound => Fragment::NotFoundPage,
        ListingResult::ApiError(message) => {
            Fragment::Error(format!("GitHub API error: {}", message))
        }
        ListingResult::ParseError => Fragment::Error(
            "The API response was not in the expected format.".to_string(),
        ),
    }
}

/// Fragment for the repository index page: one link per repository
pub fn render_repo_index(user: &str, repos: &[Repository]) -> Fragment {
    Fragment::LinkList {
        heading: format!("GitHub Repositories of {}", user),
        links: repos
            .iter()
            .map(|repo| Link {
                label: repo.name.clone(),
                href: format!("/repos/{}", repo.name),
            })
            .collect(),
    }
}

/// Header navigation entries for the given auth state
///
/// Pure data; the same state always yields the same entries.
pub fn header_nav(state: AuthState) -> Vec<Link> {
    match state {
        AuthState::SignedOut => vec![
            Link {
                label: "Sign in".to_string(),
                href: "/sign-in".to_string(),
            },
            Link {
                label: "Sign up".to_string(),
                href: "/sign-up".to_string(),
            },
        ],
        AuthState::SignedIn => vec![
            Link {
                label: "Repos".to_string(),
                href: "/repos".to_string(),
            },
            Link {
                label: "Contact".to_string(),
                href: "/contact".to_string(),
            },
            Link {
                label: "Sign out".to_string(),
                href: "/sign-out".to_string(),
            },
        ],
    }
}
