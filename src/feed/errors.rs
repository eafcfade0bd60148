/// Errors from the hashtag feed layer.
use thiserror::Error;

/// Typed errors from talking to the feed endpoint.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The configured base URL cannot carry a path (e.g. `mailto:`).
    #[error("Base URL '{url}' cannot be used as an endpoint origin")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (DNS, TLS, timeout, connection reset).
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("GET {url} failed with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the expected hashtag feed JSON.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
