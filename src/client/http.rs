//! Request dispatch: URL construction, GET execution, retry.

use std::fmt::Write;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{DmapiError, Result};
use crate::response::DmapiResponse;
use crate::utils::truncate_for_log;

use super::DmapiClient;

impl DmapiClient {
    /// Executes one operation against the API and parses the reply.
    ///
    /// Transient transport errors are retried according to the configured
    /// retry knobs. A reply the server answers at all (including with a
    /// non-2xx HTTP status) is parsed and returned, because the protocol
    /// signals failure through the text body, not the HTTP status.
    pub(crate) async fn execute(
        &self,
        operation: &str,
        params: &[(&str, String)],
    ) -> Result<DmapiResponse> {
        let url = request_url(&self.config.base_url, operation, params);
        let max_retries = self.config.max_retries;

        let mut last_error = None;
        for attempt in 0..=max_retries {
            match self.execute_once(operation, &url).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < max_retries && e.is_transient() => {
                    let delay = retry_delay(&self.config, attempt);
                    log::warn!(
                        "[dmapi] {operation} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DmapiError::NetworkError {
            detail: "all retries exhausted with no error captured".to_string(),
        }))
    }

    async fn execute_once(&self, operation: &str, url: &str) -> Result<DmapiResponse> {
        if self.config.log_requests {
            log::debug!("[dmapi] GET {url}");
        } else {
            log::debug!("[dmapi] GET {operation}");
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DmapiError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                DmapiError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[dmapi] {operation} -> HTTP {status}");

        let text = response
            .text()
            .await
            .map_err(|e| DmapiError::NetworkError {
                detail: format!("failed to read response body: {e}"),
            })?;

        if self.config.log_responses {
            log::debug!("[dmapi] {operation} response: {}", truncate_for_log(&text));
        }

        Ok(DmapiResponse::parse(&text))
    }
}

/// Builds `{base}/request/{operation}?k1=v1&k2=v2`, percent-encoding each
/// key and value independently.
pub(crate) fn request_url(base_url: &str, operation: &str, params: &[(&str, String)]) -> String {
    let mut url = format!("{}/request/{}", base_url.trim_end_matches('/'), operation);
    for (i, (key, value)) in params.iter().enumerate() {
        let _ = write!(
            url,
            "{}{}={}",
            if i == 0 { '?' } else { '&' },
            urlencoding::encode(key),
            urlencoding::encode(value),
        );
    }
    url
}

/// Delay before the retry following failed attempt number `attempt`
/// (0-based): the configured base delay, doubled per attempt when
/// exponential backoff is on, capped at the configured maximum.
fn retry_delay(config: &ClientConfig, attempt: u32) -> Duration {
    let delay = if config.use_exponential_backoff {
        // Cap the shift so 2^attempt cannot overflow.
        config.retry_delay.saturating_mul(1 << attempt.min(20))
    } else {
        config.retry_delay
    };
    delay.min(config.max_retry_delay)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::default()
    }

    // ---- request_url ----

    #[test]
    fn url_without_params() {
        assert_eq!(
            request_url("https://dmapi.joker.com", "result-list", &[]),
            "https://dmapi.joker.com/request/result-list"
        );
    }

    #[test]
    fn url_with_params() {
        let params = [
            ("domain", "example.com".to_string()),
            ("period", "1".to_string()),
        ];
        assert_eq!(
            request_url("https://dmapi.joker.com", "domain-renew", &params),
            "https://dmapi.joker.com/request/domain-renew?domain=example.com&period=1"
        );
    }

    #[test]
    fn url_percent_encodes_keys_and_values() {
        let params = [("zone", "A:www:192.168.1.1 #note".to_string())];
        assert_eq!(
            request_url("https://svc.joker.com", "dns-zone-put", &params),
            "https://svc.joker.com/request/dns-zone-put?zone=A%3Awww%3A192.168.1.1%20%23note"
        );
    }

    #[test]
    fn url_trailing_slash_on_base_is_tolerated() {
        assert_eq!(
            request_url("https://dmapi.joker.com/", "login", &[]),
            "https://dmapi.joker.com/request/login"
        );
    }

    // ---- retry_delay ----

    #[test]
    fn exponential_backoff_doubles() {
        let config = config();
        assert_eq!(retry_delay(&config, 0), Duration::from_secs(1));
        assert_eq!(retry_delay(&config, 1), Duration::from_secs(2));
        assert_eq!(retry_delay(&config, 2), Duration::from_secs(4));
        assert_eq!(retry_delay(&config, 3), Duration::from_secs(8));
    }

    #[test]
    fn exponential_backoff_capped_at_max() {
        let config = config();
        // 2^6 = 64s, capped at the 30s default maximum.
        assert_eq!(retry_delay(&config, 6), Duration::from_secs(30));
        assert_eq!(retry_delay(&config, 19), Duration::from_secs(30));
    }

    #[test]
    fn fixed_delay_when_backoff_disabled() {
        let mut config = config();
        config.use_exponential_backoff = false;
        assert_eq!(retry_delay(&config, 0), Duration::from_secs(1));
        assert_eq!(retry_delay(&config, 5), Duration::from_secs(1));
    }

    #[test]
    fn fixed_delay_still_capped_at_max() {
        let mut config = config();
        config.use_exponential_backoff = false;
        config.retry_delay = Duration::from_secs(60);
        assert_eq!(retry_delay(&config, 0), Duration::from_secs(30));
    }
}
