// ABOUTME: Cloud client error types with SNAFU pattern.
// ABOUTME: Single wrapper for transport, API, and serialization failures.

use snafu::Snafu;

/// Unified error for any cloud client failure.
///
/// Every SDK-level failure (HTTP transport, API rejection, malformed
/// response) collapses into this one type; callers abort the current
/// operation rather than retry.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CloudError {
    #[snafu(display("request failed: {source}"))]
    Transport { source: reqwest::Error },

    #[snafu(display("API request rejected ({status}): {body}"))]
    Api { status: u16, body: String },

    #[snafu(display("malformed API response: {source}"))]
    Malformed { source: serde_json::Error },

    #[snafu(display("operation timed out after {seconds}s"))]
    Timeout { seconds: u64 },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudErrorKind {
    /// Request never reached the API or the connection dropped.
    Transport,
    /// The API answered with a non-success status.
    Api,
    /// The API answered with a body we could not parse.
    Malformed,
    /// The bounded call did not finish in time.
    Timeout,
}

impl CloudError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> CloudErrorKind {
        match self {
            CloudError::Transport { .. } => CloudErrorKind::Transport,
            CloudError::Api { .. } => CloudErrorKind::Api,
            CloudError::Malformed { .. } => CloudErrorKind::Malformed,
            CloudError::Timeout { .. } => CloudErrorKind::Timeout,
        }
    }

    /// Returns the HTTP status if the API rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            CloudError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
