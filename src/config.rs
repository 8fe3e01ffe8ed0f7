//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Production endpoint of the DMAPI.
pub const DEFAULT_BASE_URL: &str = "https://dmapi.joker.com";

/// Default per-request timeout.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connect timeout.
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default number of automatic retries for transient transport errors.
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay between retries.
pub(crate) const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Default upper bound on a single retry delay.
pub(crate) const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Configuration for a [`DmapiClient`](crate::DmapiClient).
///
/// All fields have working defaults; construct via [`ClientConfig::default`]
/// and override what you need, or use the setters on
/// [`DmapiClientBuilder`](crate::DmapiClientBuilder).
///
/// The retry knobs apply to transient transport failures only
/// ([`NetworkError`](crate::DmapiError::NetworkError) and
/// [`Timeout`](crate::DmapiError::Timeout)). A reply the server answers
/// with `NACK` is a completed request and is never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the API endpoint, without a trailing `/request` path.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum number of automatic retries for transient transport errors.
    /// `0` disables retrying.
    pub max_retries: u32,
    /// Base delay between retry attempts.
    pub retry_delay: Duration,
    /// Double the delay after each failed attempt instead of keeping it
    /// fixed.
    pub use_exponential_backoff: bool,
    /// Upper bound on a single retry delay.
    pub max_retry_delay: Duration,
    /// Log the full outgoing request URL at debug level.
    ///
    /// Off by default: the URL carries credentials as query parameters.
    pub log_requests: bool,
    /// Log the raw (truncated) response text at debug level.
    pub log_responses: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            use_exponential_backoff: true,
            max_retry_delay: DEFAULT_MAX_RETRY_DELAY,
            log_requests: false,
            log_responses: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://dmapi.joker.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert!(config.use_exponential_backoff);
        assert_eq!(config.max_retry_delay, Duration::from_secs(30));
        assert!(!config.log_requests);
        assert!(!config.log_responses);
    }
}
