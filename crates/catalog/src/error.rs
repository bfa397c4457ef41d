//! Error types for fetching catalog pages.
//!
//! Every terminal failure of a page fetch is reported as one `FetchError`.
//! The `FetchCause` inside it says what actually went wrong.

use std::time::Duration;

use thiserror::Error;

use crate::types::PageNumber;

/// The underlying reason a page fetch failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchCause {
    /// Upstream answered with a non-success status code
    #[error("upstream responded with status {0}")]
    Status(u16),

    /// The whole attempt (connect + response + decode) exceeded its budget
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused, reset, DNS failure, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body was not a valid catalog page
    #[error("failed to decode page body: {0}")]
    Decode(String),
}

/// Upstream fetch failed.
///
/// Carries the page that was attempted, the HTTP status if one was obtained,
/// and the cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch movies from page {page}: {cause}")]
pub struct FetchError {
    pub page: PageNumber,
    pub status: Option<u16>,
    #[source]
    pub cause: FetchCause,
}

impl FetchError {
    /// Build an error for a non-success HTTP status.
    pub fn status(page: PageNumber, status: u16) -> Self {
        Self {
            page,
            status: Some(status),
            cause: FetchCause::Status(status),
        }
    }

    pub fn timeout(page: PageNumber, after: Duration) -> Self {
        Self {
            page,
            status: None,
            cause: FetchCause::Timeout(after),
        }
    }

    pub fn transport(page: PageNumber, reason: impl Into<String>) -> Self {
        Self {
            page,
            status: None,
            cause: FetchCause::Transport(reason.into()),
        }
    }

    /// A 2xx response whose body could not be decoded.
    pub fn decode(page: PageNumber, status: u16, reason: impl Into<String>) -> Self {
        Self {
            page,
            status: Some(status),
            cause: FetchCause::Decode(reason.into()),
        }
    }

    /// True for 5xx responses, the only failures worth retrying.
    pub fn is_server_error(&self) -> bool {
        matches!(self.cause, FetchCause::Status(code) if (500..600).contains(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_classification() {
        assert!(FetchError::status(1, 500).is_server_error());
        assert!(FetchError::status(1, 503).is_server_error());
        assert!(!FetchError::status(1, 404).is_server_error());
        assert!(!FetchError::timeout(1, Duration::from_secs(1)).is_server_error());
        assert!(!FetchError::transport(1, "connection refused").is_server_error());
        // A decode failure keeps the 200 status but is not a server error
        assert!(!FetchError::decode(1, 200, "expected value").is_server_error());
    }

    #[test]
    fn test_error_message_names_page() {
        let err = FetchError::status(7, 502);
        assert_eq!(
            err.to_string(),
            "Failed to fetch movies from page 7: upstream responded with status 502"
        );
        assert_eq!(err.status, Some(502));
    }

    #[test]
    fn test_source_is_cause() {
        use std::error::Error as _;

        let err = FetchError::transport(3, "reset by peer");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("transport error: reset by peer"));
    }
}
