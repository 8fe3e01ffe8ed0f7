//! # joker-dmapi
//!
//! Client library for the [Joker.com](https://joker.com/) **DMAPI** domain
//! management protocol and its **SVC** dynamic DNS variant.
//!
//! The DMAPI is a line-oriented text protocol over HTTP GET: every request
//! is `{base}/request/{operation}?param=value&...`, every reply is a block
//! of `Name: Value` headers, a blank line, and an optional free-text body.
//! Success and failure are signalled in-band (`status-code` / `result`
//! headers), never through the HTTP status, so a server-side rejection is
//! returned as a normal [`DmapiResponse`] for inspection, not as an error.
//!
//! ## Authentication
//!
//! | Credentials | Behavior |
//! |-------------|----------|
//! | [`Credentials::ApiKey`] | Key attached to every request; no session |
//! | [`Credentials::Password`] | Exchanged for a session token (`auth-sid`) on first use |
//!
//! Password clients log in lazily: the first authenticated operation
//! performs a single `login` call and reuses the returned token until
//! [`logout`](DmapiClient::logout).
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS
//!   implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use joker_dmapi::{Credentials, DmapiClient};
//!
//! #[tokio::main]
//! async fn main() -> joker_dmapi::Result<()> {
//!     let client = DmapiClient::new(Credentials::ApiKey {
//!         api_key: "your-key".to_string(),
//!     })?;
//!
//!     let response = client.query_domain_list(None).await?;
//!     if response.is_success() {
//!         for line in response.body.as_deref().unwrap_or_default().lines() {
//!             println!("{line}");
//!         }
//!     } else {
//!         eprintln!("rejected: {:?}", response.errors);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Dynamic DNS
//!
//! [`SvcClient`] talks to the SVC endpoint with per-zone dynamic DNS
//! credentials and implements TXT record changes as a strict
//! read-modify-write cycle over the colon-delimited zone text
//! (see [`ZoneRecord`]):
//!
//! ```rust,no_run
//! # async fn example() -> joker_dmapi::Result<()> {
//! use joker_dmapi::SvcClient;
//!
//! let svc = SvcClient::new("example.com", "ddns-user", "ddns-pass")?;
//! svc.set_txt_record("_acme-challenge", "validation-token", Some(300)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`Result<T, DmapiError>`](DmapiError) with four
//! variants:
//!
//! - [`DmapiError::InvalidArgument`] — bad caller input, raised before any
//!   network traffic
//! - [`DmapiError::AuthenticationFailed`] — login yielded no usable
//!   session token
//! - [`DmapiError::NetworkError`] — transport failure (retried)
//! - [`DmapiError::Timeout`] — request timeout (retried)
//!
//! Transient transport errors are automatically retried with exponential
//! backoff; see [`ClientConfig`] for the knobs. Server-side `NACK` replies
//! are data, not errors, and are never retried.

mod client;
mod config;
mod error;
mod response;
mod svc;
mod utils;
mod zone;

pub use client::{
    Credentials, DmapiClient, DmapiClientBuilder, MAX_PERIOD_YEARS, MIN_PERIOD_YEARS,
};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{DmapiError, Result};
pub use response::DmapiResponse;
pub use svc::{DEFAULT_SVC_BASE_URL, SvcClient, SvcClientBuilder};
pub use zone::{ZoneRecord, format_zone, parse_zone};
