//! Shared helpers for the credential-gated integration tests.

#![allow(dead_code)]

use std::env;

use joker_dmapi::{Credentials, DmapiClient, SvcClient};

/// Skips the test when any of the given environment variables is unset.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Asserts that an `Option` is `Some` and unwraps it, failing the test
/// otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Asserts that a `Result` is `Ok` and unwraps it, failing the test
/// otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Generates a unique TXT record label for one test run.
pub fn generate_test_label() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Builds a DMAPI client from `JOKER_API_KEY`.
pub fn api_key_client() -> Option<DmapiClient> {
    let api_key = env::var("JOKER_API_KEY").ok()?;
    DmapiClient::new(Credentials::ApiKey { api_key }).ok()
}

/// Builds a DMAPI client from `JOKER_USERNAME` / `JOKER_PASSWORD`.
pub fn password_client() -> Option<DmapiClient> {
    let username = env::var("JOKER_USERNAME").ok()?;
    let password = env::var("JOKER_PASSWORD").ok()?;
    DmapiClient::new(Credentials::Password { username, password }).ok()
}

/// Builds an SVC client from `JOKER_SVC_USERNAME` / `JOKER_SVC_PASSWORD`
/// for the zone in `TEST_DOMAIN`.
pub fn svc_client() -> Option<SvcClient> {
    let zone = env::var("TEST_DOMAIN").ok()?;
    let username = env::var("JOKER_SVC_USERNAME").ok()?;
    let password = env::var("JOKER_SVC_PASSWORD").ok()?;
    SvcClient::new(zone, username, password).ok()
}
