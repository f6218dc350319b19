//! URL and date canonicalization.
//!
//! Records from the five sources arrive with wildly different link and
//! timestamp shapes. This module reduces both to comparable forms:
//!
//! - [`normalize_url`] produces the canonical link used as a record's
//!   identity key across sources
//! - [`normalize_instant`] produces a total-orderable UTC instant, falling
//!   back to the Unix epoch sentinel instead of an absent value
//!
//! Both functions are infallible by design: a scraper never has to handle a
//! canonicalization error mid-item.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use url::Url;

/// Sentinel instant substituted for absent or unparseable dates.
pub const EPOCH: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// Normalize a URL into the canonical link form.
///
/// Lowercases scheme and host, collapses repeated path separators, strips
/// the trailing slash (the root path stays `/`), and drops the query string
/// and fragment. Idempotent: normalizing an already-canonical link returns
/// it unchanged.
///
/// Input that does not parse as an absolute URL is returned trimmed but
/// otherwise untouched, which keeps the idempotency guarantee.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(_) => return trimmed.to_string(),
    };

    let Some(host) = parsed.host_str() else {
        return trimmed.to_string();
    };
    let host = host.to_ascii_lowercase();
    let segments: Vec<&str> = parsed.path().split('/').filter(|s| !s.is_empty()).collect();
    let path = if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    };

    match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, path),
        None => format!("{}://{}{}", parsed.scheme(), host, path),
    }
}

/// Normalize a raw date string into a UTC instant.
///
/// Tries ISO-8601 first (explicit offsets and `Z` accepted; naive datetimes
/// and bare dates are assumed UTC), then RFC-2822. Empty, whitespace-only,
/// or unparseable input yields the [`EPOCH`] sentinel so downstream sort
/// ordering stays total. Never fails.
pub fn normalize_instant(raw: &str) -> DateTime<Utc> {
    let value = raw.trim();
    if value.is_empty() {
        return EPOCH;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return instant.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Utc.from_utc_datetime(&naive);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(value) {
        return instant.with_timezone(&Utc);
    }
    EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_lowercases_and_collapses() {
        assert_eq!(
            normalize_url("HTTP://Example.com//a//b/"),
            "http://example.com/a/b"
        );
    }

    #[test]
    fn test_normalize_url_root_path() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com/");
        assert_eq!(normalize_url("https://example.com///"), "https://example.com/");
    }

    #[test]
    fn test_normalize_url_drops_query_and_fragment() {
        assert_eq!(
            normalize_url("https://medium.com/coupang-engineering/post-1?source=rss#frag"),
            "https://medium.com/coupang-engineering/post-1"
        );
    }

    #[test]
    fn test_normalize_url_keeps_port() {
        assert_eq!(
            normalize_url("http://localhost:8080/a/"),
            "http://localhost:8080/a"
        );
    }

    #[test]
    fn test_normalize_url_idempotent() {
        let inputs = [
            "HTTP://Example.com//a//b/",
            "https://engineering.linecorp.com/en/blog/some-slug",
            "not a url at all",
            "  https://example.com/x?q=1  ",
        ];
        for input in inputs {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_instant_iso_with_zulu() {
        let instant = normalize_instant("2025-07-01T12:00:00Z");
        assert_eq!(instant.to_rfc3339(), "2025-07-01T12:00:00+00:00");
    }

    #[test]
    fn test_normalize_instant_iso_with_offset() {
        // Midnight KST is the previous day 15:00 in UTC.
        let instant = normalize_instant("2025-01-01T00:00:00+09:00");
        assert_eq!(instant.to_rfc3339(), "2024-12-31T15:00:00+00:00");
    }

    #[test]
    fn test_normalize_instant_naive_assumed_utc() {
        let instant = normalize_instant("2024-05-20T10:30:00");
        assert_eq!(instant.to_rfc3339(), "2024-05-20T10:30:00+00:00");
    }

    #[test]
    fn test_normalize_instant_bare_date() {
        let instant = normalize_instant("2025-03-02");
        assert_eq!(instant.to_rfc3339(), "2025-03-02T00:00:00+00:00");
    }

    #[test]
    fn test_normalize_instant_rfc2822() {
        let instant = normalize_instant("Tue, 20 May 2025 01:02:03 GMT");
        assert_eq!(instant.to_rfc3339(), "2025-05-20T01:02:03+00:00");
    }

    #[test]
    fn test_normalize_instant_garbage_is_epoch() {
        for raw in ["", "   ", "yesterday", "20250101TT", "not/a/date"] {
            assert_eq!(normalize_instant(raw), EPOCH, "expected epoch for {raw:?}");
        }
    }
}
