use thiserror::Error;

/// Why a fetch produced no snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot build request URL from '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body does not match the expected shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Status { .. })
    }
}

/// Failure of the location source to produce a fix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("location permission was denied")]
    Denied,

    #[error("no location fix available: {0}")]
    Unavailable(String),
}
