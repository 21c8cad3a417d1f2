//! Error types for gantry-client.

use reqwest::StatusCode;

/// Result type alias using [`DeployError`].
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors that can occur while deploying or undeploying an artifact.
///
/// Every failure mode surfaces as one of these variants with a
/// human-readable cause chain; none are fatal to the process. The
/// caller decides how to react.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A required configuration property is empty or missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configured admin URL does not parse.
    #[error("invalid admin URL {url:?}")]
    InvalidAdminUrl {
        /// The URL string that failed to parse.
        url: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// A REST call returned a status other than the one required at
    /// that step. No retry is attempted; the full response body is
    /// carried as diagnostic detail.
    #[error("{operation} returned unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// The REST step that failed.
        operation: &'static str,
        /// Status the server returned.
        status: StatusCode,
        /// Full response body.
        body: String,
    },

    /// The deployment POST succeeded without a `Location` header to
    /// follow.
    #[error("deployment response carried no Location header")]
    MissingLocation,

    /// The deployment status response could not be parsed.
    #[error("failed to populate connection metadata from deployment response")]
    Metadata(#[source] reqwest::Error),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Artifact I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unexpected-status error.
    #[must_use]
    pub fn unexpected_status(
        operation: &'static str,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedStatus {
            operation,
            status,
            body: body.into(),
        }
    }
}
