//! Small shared helpers.

use std::borrow::Cow;

/// Maximum number of bytes of response text reproduced in debug logs.
const LOG_BODY_LIMIT: usize = 512;

/// Shortens response text for logging.
///
/// Long bodies (whois dumps, full zones) keep a prefix plus the total
/// size; anything within the limit passes through unchanged. The cut
/// never lands inside a multi-byte character.
pub(crate) fn truncate_for_log(text: &str) -> Cow<'_, str> {
    if text.len() <= LOG_BODY_LIMIT {
        return Cow::Borrowed(text);
    }
    let mut end = LOG_BODY_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}... ({} bytes total)", &text[..end], text.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes_through() {
        assert_eq!(truncate_for_log("Status-Code: 0"), "Status-Code: 0");
    }

    #[test]
    fn limit_boundary_is_inclusive() {
        let text = "x".repeat(LOG_BODY_LIMIT);
        assert_eq!(truncate_for_log(&text), text);
    }

    #[test]
    fn long_text_keeps_prefix_and_size() {
        let text = "y".repeat(LOG_BODY_LIMIT * 2);
        let logged = truncate_for_log(&text);
        assert!(logged.starts_with("yyy"));
        assert!(logged.ends_with(&format!("({} bytes total)", LOG_BODY_LIMIT * 2)));
        assert!(logged.len() < text.len());
    }

    #[test]
    fn cut_respects_char_boundaries() {
        let text = "ü".repeat(LOG_BODY_LIMIT);
        let logged = truncate_for_log(&text);
        assert!(logged.contains("bytes total"));
    }
}
