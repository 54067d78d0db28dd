//! Error types for the chat backend transport.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`BackendError`].
pub type Result<T> = std::result::Result<T, BackendError>;

/// Classification of a failed exchange.
///
/// Every way a turn can go wrong collapses into one of these kinds, so callers
/// can branch on the cause without inspecting error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced an HTTP response.
    Network,
    /// The configured request timeout elapsed.
    Timeout,
    /// The backend answered with a non-success status code.
    Status(u16),
    /// The response body was not the expected JSON.
    MalformedBody,
    /// The response parsed, but carried no usable `response` text.
    MissingPayload,
    /// The submission was dropped before the exchange resolved.
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network error"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Status(code) => write!(f, "server returned status {code}"),
            Self::MalformedBody => write!(f, "malformed response body"),
            Self::MissingPayload => write!(f, "response carried no text"),
            Self::Cancelled => write!(f, "request cancelled"),
        }
    }
}

/// Errors raised while talking to the chat backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// HTTP transport failed (connection refused, DNS, reset, ...)
    #[error("HTTP error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The backend returned a non-success status
    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The endpoint URL could not be used to build a request
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::InvalidEndpoint(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl BackendError {
    /// Map this error onto the failure kind reported to the session.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) | Self::InvalidEndpoint(_) => FailureKind::Network,
            Self::Timeout => FailureKind::Timeout,
            Self::Status { status, .. } => FailureKind::Status(*status),
            Self::MalformedBody(_) => FailureKind::MalformedBody,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_kind_carries_code() {
        let err = BackendError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Status(503));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_malformed_body_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: BackendError = serde_err.into();
        assert_eq!(err.kind(), FailureKind::MalformedBody);
    }

    #[test]
    fn test_timeout_and_endpoint_kinds() {
        assert_eq!(BackendError::Timeout.kind(), FailureKind::Timeout);
        assert_eq!(
            BackendError::InvalidEndpoint("nope".into()).kind(),
            FailureKind::Network
        );
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(
            FailureKind::Status(500).to_string(),
            "server returned status 500"
        );
        assert_eq!(FailureKind::Timeout.to_string(), "request timed out");
    }
}
