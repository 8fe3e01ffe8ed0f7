//! DMAPI wire response and its parser.
//!
//! The protocol answers every request with a plain-text reply: a block of
//! `Name: Value` header lines, one blank line, then an optional free-text
//! body. Success and failure are signalled in-band through the
//! `status-code` and `result` headers, never through the HTTP status.

use std::collections::HashMap;

use serde::Serialize;

/// Well-known header names, matched case-insensitively.
mod header {
    pub const AUTH_SID: &str = "auth-sid";
    pub const UID: &str = "uid";
    pub const TRACKING_ID: &str = "tracking-id";
    pub const STATUS_CODE: &str = "status-code";
    pub const STATUS_TEXT: &str = "status-text";
    pub const RESULT: &str = "result";
    pub const PROC_ID: &str = "proc-id";
    pub const ACCOUNT_BALANCE: &str = "account-balance";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
}

/// One parsed reply from the DMAPI or SVC endpoint.
///
/// Constructed by [`DmapiResponse::parse`], once per request; immutable
/// afterwards. Fields that the server did not send stay `None`. The
/// status code defaults to `0`, which is also the server's success value;
/// that overlap is the vendor's own design.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DmapiResponse {
    /// Session token from the `auth-sid` header.
    pub session_id: Option<String>,
    /// Account identifier from the `uid` header.
    pub user_id: Option<String>,
    /// Server request tracking identifier from the `tracking-id` header.
    pub tracking_id: Option<String>,
    /// Numeric status from the `status-code` header; `0` means success.
    pub status_code: i32,
    /// Human-readable status from the `status-text` header.
    pub status_text: Option<String>,
    /// `ACK`/`NACK` marker from the `result` header.
    pub result: Option<String>,
    /// Identifier of an asynchronous processing job, from `proc-id`.
    pub proc_id: Option<String>,
    /// Account balance as reported by the server, from `account-balance`.
    pub account_balance: Option<String>,
    /// All `error` header values, in the order they appeared.
    pub errors: Vec<String>,
    /// All `warning` header values, in the order they appeared.
    pub warnings: Vec<String>,
    /// Free-text content after the header block, if any.
    pub body: Option<String>,
    /// Every header, known or not, keyed by lowercased name.
    headers: HashMap<String, String>,
}

impl DmapiResponse {
    /// Parses a raw reply into a structured response.
    ///
    /// Tolerates CRLF and LF line endings. Lines without a `:` (or with an
    /// empty name before it) are skipped, not rejected; an unparseable
    /// `status-code` keeps the zero default. Parsing never fails: the
    /// worst input yields a response full of defaults, which
    /// [`is_success`](Self::is_success) reports as unsuccessful because
    /// the `result` marker is missing.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut response = Self::default();

        let mut lines = raw.lines();
        for line in &mut lines {
            if line.trim().is_empty() {
                // First blank line ends the header block.
                break;
            }
            response.apply_header_line(line);
        }

        // Whatever follows the separator is the body, kept verbatim. With
        // no separator (or nothing after it) the body stays unset.
        let body_lines: Vec<&str> = lines.collect();
        if !body_lines.is_empty() {
            response.body = Some(body_lines.join("\n"));
        }

        response
    }

    fn apply_header_line(&mut self, line: &str) {
        let Some((name, value)) = line.split_once(':') else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let value = value.trim();
        let key = name.to_ascii_lowercase();

        match key.as_str() {
            header::AUTH_SID => self.session_id = Some(value.to_string()),
            header::UID => self.user_id = Some(value.to_string()),
            header::TRACKING_ID => self.tracking_id = Some(value.to_string()),
            header::STATUS_CODE => {
                // Unparseable status codes keep the zero default.
                if let Ok(code) = value.parse::<i32>() {
                    self.status_code = code;
                }
            }
            header::STATUS_TEXT => self.status_text = Some(value.to_string()),
            header::RESULT => self.result = Some(value.to_string()),
            header::PROC_ID => self.proc_id = Some(value.to_string()),
            header::ACCOUNT_BALANCE => self.account_balance = Some(value.to_string()),
            header::ERROR => self.errors.push(value.to_string()),
            header::WARNING => self.warnings.push(value.to_string()),
            _ => {}
        }

        // The map keeps every header verbatim, last value winning. For the
        // repeatable `error`/`warning` names the full sequence lives in the
        // dedicated lists above.
        self.headers.insert(key, value.to_string());
    }

    /// Whether the server reported success: status code `0` **and** a
    /// `result` marker that case-insensitively equals `ACK`. A missing
    /// marker is never successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == 0
            && self
                .result
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case("ACK"))
    }

    /// Looks up a header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All headers, keyed by lowercased name.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}
