use serde::Serialize;
use thiserror::Error;

/// Unified error type for all DMAPI and SVC operations.
///
/// Only conditions the client itself can detect are errors: invalid caller
/// input, a login that yields no usable session, and transport failures.
/// A reply in which the server reports failure (`NACK`, nonzero status
/// code) is **not** an error; it is returned as a normal
/// [`DmapiResponse`](crate::DmapiResponse) for the caller to inspect,
/// because the transport succeeded even though the remote operation did
/// not.
///
/// All variants are serializable for structured error reporting.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "code")]
pub enum DmapiError {
    /// A caller-supplied parameter is empty, blank, or out of range.
    ///
    /// Raised synchronously, before any network traffic.
    #[error("Invalid argument '{param}': {detail}")]
    InvalidArgument {
        /// Name of the offending parameter.
        param: String,
        /// Description of what is wrong with it.
        detail: String,
    },

    /// Login did not produce a usable session token.
    ///
    /// Raised when an authenticated operation cannot proceed; the caller
    /// must supply valid credentials (or retry a transient login failure).
    #[error("Authentication failed: {detail}")]
    AuthenticationFailed {
        /// Server-reported reason, when one was given.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, broken response stream, etc.).
    ///
    /// This is a transient error; see [`is_transient`](Self::is_transient).
    #[error("Network error: {detail}")]
    NetworkError {
        /// Error details from the transport layer.
        detail: String,
    },

    /// The HTTP request exceeded the configured timeout.
    ///
    /// This is a transient error; see [`is_transient`](Self::is_transient).
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details from the transport layer.
        detail: String,
    },
}

impl DmapiError {
    /// Whether the error represents a transient transport failure that may
    /// succeed on retry.
    ///
    /// Argument and authentication errors are never transient; retrying
    /// them without changing the input cannot help.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }

    pub(crate) fn invalid_argument(param: &str, detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            detail: detail.into(),
        }
    }
}

/// Convenience type alias for `Result<T, DmapiError>`.
pub type Result<T> = std::result::Result<T, DmapiError>;
