use thiserror::Error;

/// Errors that can occur while talking to the source-hosting API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("credentials rejected by the remote API")]
    AuthRejected,

    #[error("not found: {path}")]
    NotFound { path: String },

    #[error("remote API error: {message}")]
    Api { message: String },

    #[error("response body was not valid JSON")]
    Parse,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
