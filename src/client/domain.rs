//! Domain management operations.
//!
//! Each operation validates its input, then hands a fixed operation name
//! and its parameters to the dispatcher. Server-side rejections come back
//! as normal [`DmapiResponse`] values with `is_success() == false`; only
//! invalid input, authentication and transport problems are `Err`.

use crate::error::{DmapiError, Result};
use crate::response::DmapiResponse;

use super::DmapiClient;

/// Smallest accepted registration/renewal period, in years.
pub const MIN_PERIOD_YEARS: u32 = 1;
/// Largest accepted registration/renewal period, in years.
pub const MAX_PERIOD_YEARS: u32 = 10;

impl DmapiClient {
    /// Lists domains in the account, optionally filtered by a pattern.
    pub async fn query_domain_list(&self, pattern: Option<&str>) -> Result<DmapiResponse> {
        let mut params = Vec::new();
        if let Some(pattern) = pattern {
            require_nonblank("pattern", pattern)?;
            params.push(("pattern", pattern.to_string()));
        }
        self.execute_authenticated("query-domain-list", params).await
    }

    /// Queries whois data for a domain.
    pub async fn query_whois(&self, domain: &str) -> Result<DmapiResponse> {
        require_nonblank("domain", domain)?;
        self.execute_authenticated("query-whois", vec![("domain", domain.to_string())])
            .await
    }

    /// Registers a domain for the given period in years.
    pub async fn domain_register(&self, domain: &str, period: u32) -> Result<DmapiResponse> {
        require_nonblank("domain", domain)?;
        validate_period(period)?;
        self.execute_authenticated(
            "domain-register",
            vec![
                ("domain", domain.to_string()),
                ("period", period.to_string()),
            ],
        )
        .await
    }

    /// Renews a domain for the given period in years.
    pub async fn domain_renew(&self, domain: &str, period: u32) -> Result<DmapiResponse> {
        require_nonblank("domain", domain)?;
        validate_period(period)?;
        self.execute_authenticated(
            "domain-renew",
            vec![
                ("domain", domain.to_string()),
                ("period", period.to_string()),
            ],
        )
        .await
    }

    /// Requests deletion of a domain.
    pub async fn domain_delete(&self, domain: &str) -> Result<DmapiResponse> {
        require_nonblank("domain", domain)?;
        self.execute_authenticated("domain-delete", vec![("domain", domain.to_string())])
            .await
    }

    /// Lists queued/completed asynchronous processing results.
    pub async fn result_list(&self) -> Result<DmapiResponse> {
        self.execute_authenticated("result-list", Vec::new()).await
    }

    /// Retrieves one asynchronous processing result by processing id or
    /// server tracking id; at least one identifier is required.
    pub async fn result_retrieve(
        &self,
        proc_id: Option<&str>,
        tracking_id: Option<&str>,
    ) -> Result<DmapiResponse> {
        if proc_id.is_none() && tracking_id.is_none() {
            return Err(DmapiError::invalid_argument(
                "proc_id",
                "either proc_id or tracking_id must be given",
            ));
        }

        let mut params = Vec::new();
        if let Some(id) = proc_id {
            require_nonblank("proc_id", id)?;
            params.push(("proc-id", id.to_string()));
        }
        if let Some(id) = tracking_id {
            require_nonblank("tracking_id", id)?;
            params.push(("tracking-id", id.to_string()));
        }
        self.execute_authenticated("result-retrieve", params).await
    }

    /// Fetches the zone for a domain; the zone text arrives in the
    /// response body.
    pub async fn dns_zone_get(&self, domain: &str) -> Result<DmapiResponse> {
        require_nonblank("domain", domain)?;
        self.execute_authenticated("dns-zone-get", vec![("domain", domain.to_string())])
            .await
    }

    /// Replaces the zone for a domain with the given zone text.
    pub async fn dns_zone_put(&self, domain: &str, zone: &str) -> Result<DmapiResponse> {
        require_nonblank("domain", domain)?;
        self.execute_authenticated(
            "dns-zone-put",
            vec![("domain", domain.to_string()), ("zone", zone.to_string())],
        )
        .await
    }
}

/// Rejects empty or whitespace-only string parameters before any network
/// traffic.
pub(crate) fn require_nonblank(param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DmapiError::invalid_argument(
            param,
            "must not be empty or blank",
        ));
    }
    Ok(())
}

/// Rejects registration/renewal periods outside
/// [`MIN_PERIOD_YEARS`]..=[`MAX_PERIOD_YEARS`] before any network traffic.
pub(crate) fn validate_period(period: u32) -> Result<()> {
    if !(MIN_PERIOD_YEARS..=MAX_PERIOD_YEARS).contains(&period) {
        return Err(DmapiError::invalid_argument(
            "period",
            format!("must be between {MIN_PERIOD_YEARS} and {MAX_PERIOD_YEARS} years"),
        ));
    }
    Ok(())
}
