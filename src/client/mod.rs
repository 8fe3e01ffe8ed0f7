//! The DMAPI client: construction, credentials and shared state.

mod domain;
mod http;
mod session;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, DEFAULT_CONNECT_TIMEOUT};
use crate::error::{DmapiError, Result};

pub use domain::{MAX_PERIOD_YEARS, MIN_PERIOD_YEARS};
pub(crate) use domain::require_nonblank;

/// Credential set for the DMAPI, fixed at client construction.
///
/// Exactly one authentication method is configured per client. An API key
/// is attached to every request directly and needs no session; a
/// username/password pair is exchanged for a session token on first use
/// (see [`DmapiClient::login`]).
///
/// # Serialization
///
/// Serialized as a tagged enum with `"method"` as the tag:
///
/// ```json
/// { "method": "apiKey", "apiKey": "..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Credentials {
    /// Long-lived API key.
    ApiKey {
        /// The key itself.
        api_key: String,
    },
    /// Account username and password, exchanged for a session token.
    Password {
        /// Account username.
        username: String,
        /// Account password.
        password: String,
    },
}

impl Credentials {
    /// Validates that the configured method is fully specified.
    fn validate(&self) -> Result<()> {
        match self {
            Self::ApiKey { api_key } => require_nonblank("api_key", api_key),
            Self::Password { username, password } => {
                require_nonblank("username", username)?;
                require_nonblank("password", password)
            }
        }
    }
}

/// Client for the DMAPI domain management protocol.
///
/// All operations take `&self` and run sequentially per call; the only
/// shared mutable state is the session token. Password-based clients that
/// issue their very first authenticated calls concurrently may race to
/// log in. That race is benign (both logins succeed, the last token
/// written wins) but wastes a round trip, so serialize the first call if
/// that matters.
///
/// The underlying HTTP connection pool is released when the client is
/// dropped.
///
/// # Construction
///
/// ```rust,no_run
/// use joker_dmapi::{Credentials, DmapiClient};
///
/// let client = DmapiClient::new(Credentials::ApiKey {
///     api_key: "your-key".to_string(),
/// })?;
/// # Ok::<(), joker_dmapi::DmapiError>(())
/// ```
pub struct DmapiClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
    pub(crate) credentials: Credentials,
    pub(crate) session: Mutex<Option<String>>,
}

/// Builder for [`DmapiClient`] with configurable endpoint, timeout,
/// retry and logging behavior.
pub struct DmapiClientBuilder {
    credentials: Credentials,
    config: ClientConfig,
}

impl DmapiClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: ClientConfig::default(),
        }
    }

    /// Replace the whole configuration at once.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the API base URL (default: the production DMAPI endpoint).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout (default: 30 s).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of automatic retries for transient
    /// transport errors (default: 3; 0 disables retrying).
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the base delay between retries (default: 1 s).
    #[must_use]
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.config.retry_delay = retry_delay;
        self
    }

    /// Enable or disable exponential backoff between retries
    /// (default: enabled).
    #[must_use]
    pub fn use_exponential_backoff(mut self, enabled: bool) -> Self {
        self.config.use_exponential_backoff = enabled;
        self
    }

    /// Set the upper bound on a single retry delay (default: 30 s).
    #[must_use]
    pub fn max_retry_delay(mut self, max_retry_delay: Duration) -> Self {
        self.config.max_retry_delay = max_retry_delay;
        self
    }

    /// Log full outgoing request URLs at debug level (default: off; URLs
    /// carry credentials).
    #[must_use]
    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.config.log_requests = enabled;
        self
    }

    /// Log raw (truncated) response text at debug level (default: off).
    #[must_use]
    pub fn log_responses(mut self, enabled: bool) -> Self {
        self.config.log_responses = enabled;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`DmapiError::InvalidArgument`] if the configured
    /// credential fields are empty or blank.
    pub fn build(self) -> Result<DmapiClient> {
        self.credentials.validate()?;

        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| DmapiError::NetworkError {
                detail: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(DmapiClient {
            client,
            config: self.config,
            credentials: self.credentials,
            session: Mutex::new(None),
        })
    }
}

impl DmapiClient {
    /// Creates a client with default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Returns a builder for customizing the client configuration.
    pub fn builder(credentials: Credentials) -> DmapiClientBuilder {
        DmapiClientBuilder::new(credentials)
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The currently held session token, if any.
    ///
    /// API-key clients never hold one.
    #[must_use]
    pub fn session_id(&self) -> Option<String> {
        self.session_slot().clone()
    }

    /// Locks the session slot. The lock is never held across an await
    /// point; a poisoned lock only means a panic elsewhere mid-update of
    /// an `Option<String>`, so the value is still usable.
    pub(crate) fn session_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
