use thiserror::Error;

/// Message used when an error response carries no usable `message`
pub const GENERIC_HTTP_ERROR: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("{message} (status {status_code})")]
    Http { status_code: u16, message: String },

    /// A mutation was attempted without an authenticated session
    #[error("{0}")]
    GuestForbidden(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProviderError {
    /// HTTP status of the failure, if the backend produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BACKEND_BASE_URL is not set")]
    MissingBaseUrl,

    #[error("Invalid URL in {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access state file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("State file '{path}' is corrupt: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
}
