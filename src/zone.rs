//! DNS zone records and the colon-delimited zone text codec.
//!
//! A zone is transferred as newline-delimited text, one record per line:
//! `Type:Label[:Priority]:Value[:Ttl]`. Blank lines and `#` comments are
//! skipped. Serializing and parsing are a near-inverse pair, not a perfect
//! round trip: with exactly four segments the format cannot distinguish a
//! priority from a TTL for non-MX types, because the disambiguation is
//! keyed off the record type rather than a structural marker. The
//! heuristic here reproduces the server's reading of the format; do not
//! tighten it.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// One zone entry.
///
/// Type, label and value are always present; TTL and priority are
/// independently optional. Records carry no identity beyond the
/// `(type, label)` pair used for replacement matching, and live only for
/// the duration of a get-modify-put cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Record type, e.g. `"A"`, `"TXT"`, `"CNAME"`, `"MX"`.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record label; `"@"` denotes the zone apex.
    pub label: String,
    /// Record value (address, target hostname, text, ...).
    pub value: String,
    /// Time to live in seconds, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Priority, meaningful for MX-like types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl ZoneRecord {
    /// Creates a record with no TTL and no priority.
    pub fn new(
        record_type: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            label: label.into(),
            value: value.into(),
            ttl: None,
            priority: None,
        }
    }

    /// An `A` record mapping `label` to an IPv4 address.
    pub fn a(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new("A", label, address)
    }

    /// An `AAAA` record mapping `label` to an IPv6 address.
    pub fn aaaa(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new("AAAA", label, address)
    }

    /// A `CNAME` record aliasing `label` to a target hostname.
    pub fn cname(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new("CNAME", label, target)
    }

    /// A `TXT` record carrying arbitrary text.
    pub fn txt(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("TXT", label, text)
    }

    /// An `MX` record with the given priority.
    pub fn mx(label: impl Into<String>, priority: u16, exchange: impl Into<String>) -> Self {
        let mut record = Self::new("MX", label, exchange);
        record.priority = Some(priority);
        record
    }

    /// Returns the record with the TTL set.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Whether this record matches the given type and label,
    /// case-insensitively. This is the identity used when replacing
    /// records in a zone.
    #[must_use]
    pub fn matches(&self, record_type: &str, label: &str) -> bool {
        self.record_type.eq_ignore_ascii_case(record_type)
            && self.label.eq_ignore_ascii_case(label)
    }

    /// Serializes the record to one zone line:
    /// `Type:Label[:Priority]:Value[:Ttl]`.
    #[must_use]
    pub fn to_zone_line(&self) -> String {
        let mut line = format!("{}:{}", self.record_type, self.label);
        if let Some(priority) = self.priority {
            let _ = write!(line, ":{priority}");
        }
        let _ = write!(line, ":{}", self.value);
        if let Some(ttl) = self.ttl {
            let _ = write!(line, ":{ttl}");
        }
        line
    }

    /// Parses one zone line, skipping blanks, `#` comments and lines with
    /// fewer than three non-empty segments.
    ///
    /// With more than three segments: for `MX` (case-insensitive) an
    /// integer third segment is the priority, and an integer fifth segment
    /// is the TTL; for everything else an integer last segment is the TTL
    /// and the value shifts to the second-to-last segment.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let segments: Vec<&str> = line.split(':').filter(|s| !s.is_empty()).collect();
        if segments.len() < 3 {
            return None;
        }

        let record_type = segments[0];
        let label = segments[1];
        let mut value = segments[segments.len() - 1];
        let mut ttl = None;
        let mut priority = None;

        if segments.len() > 3 {
            if record_type.eq_ignore_ascii_case("MX")
                && let Ok(parsed) = segments[2].parse::<u16>()
            {
                priority = Some(parsed);
                if let Some(parsed_ttl) = segments.get(4).and_then(|s| s.parse::<u32>().ok()) {
                    ttl = Some(parsed_ttl);
                    value = segments[3];
                }
            } else if let Ok(parsed) = value.parse::<u32>() {
                ttl = Some(parsed);
                value = segments[segments.len() - 2];
            }
        }

        Some(Self {
            record_type: record_type.to_string(),
            label: label.to_string(),
            value: value.to_string(),
            ttl,
            priority,
        })
    }
}

/// Parses zone text into records, one per line, skipping blank lines,
/// `#` comments and lines the line parser rejects.
#[must_use]
pub fn parse_zone(text: &str) -> Vec<ZoneRecord> {
    text.lines().filter_map(ZoneRecord::parse_line).collect()
}

/// Serializes records to zone text, one line per record.
#[must_use]
pub fn format_zone(records: &[ZoneRecord]) -> String {
    records
        .iter()
        .map(ZoneRecord::to_zone_line)
        .collect::<Vec<_>>()
        .join("\n")
}
