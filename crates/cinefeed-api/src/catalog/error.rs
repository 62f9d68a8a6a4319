//! Catalog error taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used by the catalog client and facade.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failure of a single catalog call.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// The request could not be sent, or the response could not be read or decoded.
    #[error("catalog request to {endpoint} failed: {cause}")]
    Transport {
        /// Endpoint path of the failed call.
        endpoint: String,
        /// Underlying cause.
        #[source]
        cause: TransportCause,
    },

    /// The catalog service answered with a non-success status.
    #[error("catalog API error for {endpoint} (HTTP {status}): {message}")]
    Upstream {
        /// Endpoint path of the failed call.
        endpoint: String,
        /// HTTP status returned by the service.
        status: StatusCode,
        /// Service message, or the canonical status text.
        message: String,
    },
}

/// Cause of a [`CatalogError::Transport`].
#[derive(Debug, Error)]
pub enum TransportCause {
    /// Connection, send or body read failure.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body is not JSON or does not match the expected shape.
    #[error("failed to decode JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint path does not form a valid URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Failure to construct a [`CatalogClient`](super::CatalogClient).
#[derive(Debug, Error)]
pub enum BuildError {
    /// `user_agent` was not set.
    #[error("user_agent is required")]
    MissingUserAgent,

    /// Base URL cannot serve as a base for endpoint paths.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// `reqwest::Client` build failed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl CatalogError {
    pub(crate) fn transport(endpoint: &str, cause: impl Into<TransportCause>) -> Self {
        Self::Transport {
            endpoint: String::from(endpoint),
            cause: cause.into(),
        }
    }

    pub(crate) fn upstream(endpoint: &str, status: StatusCode, message: impl Into<String>) -> Self {
        Self::Upstream {
            endpoint: String::from(endpoint),
            status,
            message: message.into(),
        }
    }

    /// Endpoint path the failure belongs to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Transport { endpoint, .. } | Self::Upstream { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status for upstream failures.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }

    /// Returns `true` for transport (send, read or decode) failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` for non-success responses.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
