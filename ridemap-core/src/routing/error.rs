//! Errors reported by route providers.

use thiserror::Error;

/// Why a route could not be resolved.
///
/// Renderers recover from every variant locally; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The provider found no drivable path between the endpoints.
    #[error("no route found between the requested coordinates")]
    NoRouteFound,
    /// The provider could not be reached or returned an unusable answer.
    #[error("routing provider failed ({kind}): {message}")]
    ProviderFailure {
        /// Broad category of the failure.
        kind: ProviderFailureKind,
        /// Human-readable detail, usually from the transport or service.
        message: String,
    },
    /// The request was abandoned before it resolved.
    #[error("route request was cancelled")]
    Cancelled,
}

impl RouteError {
    /// Shorthand for a [`RouteError::ProviderFailure`].
    #[must_use]
    pub fn provider(kind: ProviderFailureKind, message: impl Into<String>) -> Self {
        Self::ProviderFailure {
            kind,
            message: message.into(),
        }
    }
}

/// Category of a [`RouteError::ProviderFailure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailureKind {
    /// Connection refused, DNS failure and similar transport errors.
    Network,
    /// The request exceeded the configured timeout.
    Timeout {
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    Http {
        /// HTTP status code.
        status: u16,
    },
    /// The service answered but reported an error code of its own.
    Service {
        /// Service-specific error code, e.g. `"InvalidQuery"`.
        code: String,
    },
    /// The response body could not be decoded.
    Parse,
    /// The provider stopped without answering, e.g. it panicked.
    Internal,
}

impl std::fmt::Display for ProviderFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Timeout { timeout_secs } => write!(f, "timed out after {timeout_secs}s"),
            Self::Http { status } => write!(f, "HTTP {status}"),
            Self::Service { code } => write!(f, "service code {code}"),
            Self::Parse => f.write_str("parse"),
            Self::Internal => f.write_str("internal"),
        }
    }
}
