//! Error types for Hypercharts operations.
//!
//! This module defines [`HyperError`] which covers every failure that can occur
//! when configuring the client, fetching a resource, or parsing its payload.
//! Ratios that cannot be computed are not errors; see [`Ratio`](crate::Ratio).

use thiserror::Error;

/// Errors that can occur during Hypercharts operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HyperError {
    /// No API key was supplied at the boundary.
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    /// The API answered 404 for the requested resource.
    #[error("Resource '{0}' does not exist")]
    ResourceNotFound(String),

    /// The API rejected the request (HTTP 400) with the given message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Network failure, timeout, or an unexpected HTTP status.
    #[error("Transport error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// A successful response whose body could not be decoded as JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A required key was absent from a financials entry.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A quarter label did not match the `"YY Qn"` pattern.
    #[error("Invalid quarter label: {0:?}")]
    InvalidQuarterLabel(String),

    /// An invalid configuration parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl HyperError {
    /// Creates a transport error without an HTTP status.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ResourceNotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias using [`HyperError`].
pub type Result<T> = std::result::Result<T, HyperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = HyperError::ResourceNotFound("financials".to_string());
        assert_eq!(err.to_string(), "Resource 'financials' does not exist");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_transport_message_with_and_without_status() {
        let err = HyperError::Transport {
            status: Some(503),
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Transport error (HTTP 503): unavailable");

        let err = HyperError::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");
        assert_eq!(err.status(), None);
    }
}
