use thiserror::Error;

/// Failures that abort a fetch cycle.
///
/// Unmapped icon codes and missing measurements are not errors: the first
/// passes the raw code through, the second propagates as `None`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid validTime '{value}'")]
    InvalidTimestamp { value: String },

    #[error("no observation stations listed at {url}")]
    NoStation { url: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// True for every failure that originates at the remote boundary.
    pub fn is_remote_failure(&self) -> bool {
        !matches!(self, Error::Client(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
