//! Client for the SVC dynamic DNS service.
//!
//! SVC is the credential-lighter variant of the DMAPI used for DNS-only
//! changes: the same wire protocol, served from its own endpoint, with
//! per-zone dynamic DNS username/password credentials. The high-level
//! operations here implement a strict read-modify-write cycle over the
//! zone text.

use crate::client::{Credentials, DmapiClient, require_nonblank};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::response::DmapiResponse;
use crate::zone::{self, ZoneRecord};

/// Production endpoint of the SVC service.
pub const DEFAULT_SVC_BASE_URL: &str = "https://svc.joker.com";

/// Client for the SVC dynamic DNS service, bound to one zone.
///
/// # Construction
///
/// ```rust,no_run
/// use joker_dmapi::SvcClient;
///
/// # async fn example() -> joker_dmapi::Result<()> {
/// let svc = SvcClient::new("example.com", "ddns-user", "ddns-pass")?;
/// let response = svc.set_txt_record("_acme-challenge", "token-value", Some(300)).await?;
/// if !response.is_success() {
///     eprintln!("update rejected: {:?}", response.errors);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SvcClient {
    client: DmapiClient,
    zone: String,
}

/// Builder for [`SvcClient`] with configurable endpoint and client
/// behavior.
pub struct SvcClientBuilder {
    zone: String,
    username: String,
    password: String,
    config: ClientConfig,
}

impl SvcClientBuilder {
    fn new(zone: String, username: String, password: String) -> Self {
        Self {
            zone,
            username,
            password,
            config: ClientConfig {
                base_url: DEFAULT_SVC_BASE_URL.to_string(),
                ..ClientConfig::default()
            },
        }
    }

    /// Set the SVC base URL (default: the production SVC endpoint).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Replace the whole configuration at once.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`DmapiError::InvalidArgument`](crate::DmapiError) if
    /// the zone or either credential field is blank.
    pub fn build(self) -> Result<SvcClient> {
        require_nonblank("zone", &self.zone)?;
        let client = DmapiClient::builder(Credentials::Password {
            username: self.username,
            password: self.password,
        })
        .config(self.config)
        .build()?;

        Ok(SvcClient {
            client,
            zone: self.zone,
        })
    }
}

impl SvcClient {
    /// Creates an SVC client for one zone with default configuration.
    pub fn new(
        zone: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(zone, username, password).build()
    }

    /// Returns a builder for customizing the client configuration.
    pub fn builder(
        zone: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> SvcClientBuilder {
        SvcClientBuilder::new(zone.into(), username.into(), password.into())
    }

    /// The zone this client manages.
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Fetches the current zone; the zone text is in the response body.
    pub async fn zone_get(&self) -> Result<DmapiResponse> {
        self.client.dns_zone_get(&self.zone).await
    }

    /// Replaces the zone with the given records.
    pub async fn zone_put(&self, records: &[ZoneRecord]) -> Result<DmapiResponse> {
        self.client
            .dns_zone_put(&self.zone, &zone::format_zone(records))
            .await
    }

    /// Creates or replaces the TXT record at `label`.
    ///
    /// Reads the zone, removes every record matching `(TXT, label)`
    /// case-insensitively, appends the new record and writes the zone
    /// back. If the read step is not successful its response is returned
    /// as-is and nothing is written.
    pub async fn set_txt_record(
        &self,
        label: &str,
        value: &str,
        ttl: Option<u32>,
    ) -> Result<DmapiResponse> {
        require_nonblank("label", label)?;
        require_nonblank("value", value)?;

        let get_response = self.zone_get().await?;
        if !get_response.is_success() {
            log::warn!(
                "[svc] zone read for '{}' failed, skipping write: {:?}",
                self.zone,
                get_response.errors,
            );
            return Ok(get_response);
        }

        let mut records = zone::parse_zone(get_response.body.as_deref().unwrap_or_default());
        let mut record = ZoneRecord::txt(label, value);
        record.ttl = ttl;
        patch_txt_record(&mut records, record);

        self.zone_put(&records).await
    }

    /// Deletes the TXT record at `label`, if present.
    ///
    /// Same read-modify-write cycle as [`set_txt_record`](Self::set_txt_record),
    /// without the append. The zone is written back even when no record
    /// matched; the write is then a no-op on the server side.
    pub async fn delete_txt_record(&self, label: &str) -> Result<DmapiResponse> {
        require_nonblank("label", label)?;

        let get_response = self.zone_get().await?;
        if !get_response.is_success() {
            log::warn!(
                "[svc] zone read for '{}' failed, skipping write: {:?}",
                self.zone,
                get_response.errors,
            );
            return Ok(get_response);
        }

        let mut records = zone::parse_zone(get_response.body.as_deref().unwrap_or_default());
        remove_txt_records(&mut records, label);

        self.zone_put(&records).await
    }
}

/// Replaces every `(TXT, label)` record with the given one, appending it
/// at the end of the zone.
fn patch_txt_record(records: &mut Vec<ZoneRecord>, record: ZoneRecord) {
    remove_txt_records(records, &record.label);
    records.push(record);
}

/// Drops every record matching `(TXT, label)` case-insensitively.
fn remove_txt_records(records: &mut Vec<ZoneRecord>, label: &str) {
    records.retain(|r| !r.matches("TXT", label));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_zone() -> Vec<ZoneRecord> {
        vec![
            ZoneRecord::a("www", "192.168.1.1").with_ttl(3600),
            ZoneRecord::txt("home", "old-value"),
            ZoneRecord::mx("@", 10, "mail.example.com"),
            ZoneRecord::txt("other", "keep-me"),
        ]
    }

    #[test]
    fn patch_replaces_matching_txt_record() {
        let mut records = sample_zone();
        patch_txt_record(&mut records, ZoneRecord::txt("home", "new-value").with_ttl(300));

        assert_eq!(records.len(), 4);
        let patched: Vec<_> = records.iter().filter(|r| r.matches("TXT", "home")).collect();
        assert_eq!(patched.len(), 1);
        assert_eq!(patched[0].value, "new-value");
        assert_eq!(patched[0].ttl, Some(300));
        // Unrelated records survive untouched.
        assert!(records.iter().any(|r| r.matches("TXT", "other")));
        assert!(records.iter().any(|r| r.matches("A", "www")));
    }

    #[test]
    fn patch_matches_label_case_insensitively() {
        let mut records = vec![ZoneRecord::txt("Home", "old")];
        patch_txt_record(&mut records, ZoneRecord::txt("home", "new"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "new");
    }

    #[test]
    fn patch_appends_when_nothing_matches() {
        let mut records = sample_zone();
        patch_txt_record(&mut records, ZoneRecord::txt("fresh", "value"));
        assert_eq!(records.len(), 5);
        assert_eq!(records[4].label, "fresh");
    }

    #[test]
    fn patch_does_not_touch_same_label_other_type() {
        let mut records = vec![ZoneRecord::a("home", "192.168.1.1")];
        patch_txt_record(&mut records, ZoneRecord::txt("home", "value"));
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.matches("A", "home")));
    }

    #[test]
    fn remove_drops_all_matching_records() {
        let mut records = sample_zone();
        records.push(ZoneRecord::txt("HOME", "duplicate"));
        remove_txt_records(&mut records, "home");
        assert_eq!(records.len(), 3);
        assert!(!records.iter().any(|r| r.matches("TXT", "home")));
    }

    #[test]
    fn remove_is_noop_without_match() {
        let mut records = sample_zone();
        remove_txt_records(&mut records, "missing");
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn builder_defaults_to_svc_endpoint() {
        let svc = SvcClient::new("example.com", "user", "pass").unwrap();
        assert_eq!(svc.client.config().base_url, DEFAULT_SVC_BASE_URL);
        assert_eq!(svc.zone(), "example.com");
    }

    #[test]
    fn builder_rejects_blank_zone() {
        assert!(SvcClient::new("  ", "user", "pass").is_err());
    }

    #[test]
    fn builder_rejects_blank_credentials() {
        assert!(SvcClient::new("example.com", "", "pass").is_err());
        assert!(SvcClient::new("example.com", "user", " ").is_err());
    }

    #[test]
    fn base_url_override() {
        let svc = SvcClient::builder("example.com", "user", "pass")
            .base_url("https://svc.ote.joker.com")
            .build()
            .unwrap();
        assert_eq!(svc.client.config().base_url, "https://svc.ote.joker.com");
    }
}
