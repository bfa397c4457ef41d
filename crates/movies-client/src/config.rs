//! Connection settings for the upstream movies API.

use std::time::Duration;

/// Public mock of the movies API, used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://wiremock.dev.eroninternational.com";

/// Immutable settings handed to `MoviesApiClient::new`.
///
/// ## Usage
/// ```ignore
/// let config = ClientConfig::new("http://localhost:9000")
///     .with_timeout(Duration::from_secs(10))
///     .with_max_retries(3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme + host (+ optional path prefix) of the upstream service
    pub base_url: String,
    /// Budget for one whole attempt: connect, response and decode
    pub timeout: Duration,
    /// Extra attempts after a 5xx response
    pub max_retries: u32,
    /// Base of the exponential backoff between retries
    pub retry_delay: Duration,
    /// Budget for the health probe
    pub health_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_health_timeout(mut self, health_timeout: Duration) -> Self {
        self.health_timeout = health_timeout;
        self
    }

    /// Delay before retry number `attempt` (0-based): `retry_delay * 2^attempt`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.retry_delay.saturating_mul(factor)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_delay: Duration::from_secs(1),
            health_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.health_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_backoff_doubles() {
        let config = ClientConfig::default().with_retry_delay(Duration::from_millis(100));

        assert_eq!(config.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(config.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(config.backoff_delay(2), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_saturates() {
        let config = ClientConfig::default();
        // Shifting past the width of u32 must not panic
        assert!(config.backoff_delay(40) >= config.backoff_delay(31));
    }
}
