//! Cross-source deduplication and ordering.
//!
//! Pools are sorted before deduplication, so the first record seen for a
//! canonical link is also the one ranked highest by the recency rule.

use crate::models::Record;
use itertools::Itertools;

/// Drop records whose canonical link was already seen.
///
/// Streaming first-seen-wins filter: output preserves input order, never
/// grows, and contains each canonical link at most once. Idempotent.
pub fn dedupe_records(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .unique_by(|record| record.canonical_link.clone())
        .collect()
}

/// Sort records by recency, newest first.
///
/// Stable sort on `(published_at descending, title descending)`. The title
/// tie-break makes the ordering total and reproducible even for records
/// sharing an instant, which the epoch-sentinel group always does.
pub fn sort_records(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.title.cmp(&a.title))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::EPOCH;
    use crate::models::{SourceGroup, Topic};
    use chrono::{DateTime, TimeZone, Utc};

    fn record(title: &str, link: &str, published_at: DateTime<Utc>) -> Record {
        Record {
            source_group: SourceGroup::Naver,
            source_name: "D2",
            title: title.to_string(),
            canonical_link: link.to_string(),
            published_at,
            topic: Topic::Other,
            tags: Vec::new(),
            provenance: format!("title={title}"),
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_dedupe_keeps_first_seen() {
        let records = vec![
            record("first", "https://a.com/x", day(3)),
            record("second", "https://a.com/y", day(2)),
            record("duplicate", "https://a.com/x", day(1)),
        ];
        let deduped = dedupe_records(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "first");
        assert_eq!(deduped[1].title, "second");
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let records = vec![
            record("a", "https://a.com/1", day(1)),
            record("b", "https://a.com/1", day(2)),
            record("c", "https://a.com/2", day(3)),
        ];
        let once = dedupe_records(records);
        let once_links: Vec<_> = once.iter().map(|r| r.canonical_link.clone()).collect();
        let twice = dedupe_records(once);
        let twice_links: Vec<_> = twice.iter().map(|r| r.canonical_link.clone()).collect();
        assert_eq!(once_links, twice_links);
    }

    #[test]
    fn test_dedupe_output_has_unique_links() {
        let records = vec![
            record("a", "https://a.com/1", day(1)),
            record("b", "https://a.com/1", day(1)),
            record("c", "https://a.com/1", day(1)),
        ];
        let deduped = dedupe_records(records);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn test_sort_newest_first() {
        let records = vec![
            record("old", "https://a.com/1", day(1)),
            record("new", "https://a.com/2", day(9)),
            record("mid", "https://a.com/3", day(5)),
        ];
        let sorted = sort_records(records);
        let titles: Vec<_> = sorted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_ties_broken_by_title_descending() {
        let records = vec![
            record("alpha", "https://a.com/1", EPOCH),
            record("zulu", "https://a.com/2", EPOCH),
            record("mike", "https://a.com/3", EPOCH),
        ];
        let sorted = sort_records(records);
        let titles: Vec<_> = sorted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["zulu", "mike", "alpha"]);
    }
}
