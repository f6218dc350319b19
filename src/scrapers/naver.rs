//! NAVER D2 Atom feed scraper.
//!
//! D2 publishes a plain Atom feed, so this is the simplest source: one
//! fetch, one parse. Entries carry a title, a single `<link href=...>`, an
//! `<updated>` timestamp, and at most one `<category term=...>` used as the
//! record's only tag.

use crate::canonical::{normalize_instant, normalize_url};
use crate::classify::classify;
use crate::models::{Record, SourceGroup};
use crate::net::Http;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::error::Error;
use tracing::{info, instrument, warn};

const FEED_URL: &str = "https://d2.naver.com/d2.atom";
const SOURCE_NAME: &str = "D2";

/// Fetch the D2 feed and map its entries into records.
#[instrument(level = "info", skip_all)]
pub async fn fetch_records(http: &Http) -> Result<Vec<Record>, Box<dyn Error>> {
    let xml = http.get_text(FEED_URL).await?;
    let records = parse_feed(&xml);
    info!(count = records.len(), "Collected NAVER records");
    Ok(records)
}

/// Which text-bearing entry element the reader is currently inside.
enum Field {
    Title,
    Updated,
}

/// Map Atom feed text into records.
///
/// Entries missing a usable title or link are skipped. A malformed document
/// yields whatever entries were complete before the malformation.
pub fn parse_feed(xml: &str) -> Vec<Record> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut in_entry = false;
    let mut field: Option<Field> = None;
    let mut title = String::new();
    let mut link = String::new();
    let mut updated = String::new();
    let mut category = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"entry" => {
                    in_entry = true;
                    title.clear();
                    link.clear();
                    updated.clear();
                    category.clear();
                }
                b"title" if in_entry => field = Some(Field::Title),
                b"updated" if in_entry => field = Some(Field::Updated),
                b"link" if in_entry => capture_first_attr(&e, b"href", &mut link),
                b"category" if in_entry => capture_first_attr(&e, b"term", &mut category),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"link" if in_entry => capture_first_attr(&e, b"href", &mut link),
                b"category" if in_entry => capture_first_attr(&e, b"term", &mut category),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(ref f) = field {
                    if let Ok(text) = t.xml_content() {
                        match f {
                            Field::Title => title.push_str(&text),
                            Field::Updated => updated.push_str(&text),
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"entry" => {
                    in_entry = false;
                    if let Some(record) = build_record(&title, &link, &updated, &category) {
                        records.push(record);
                    }
                }
                b"title" | b"updated" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(error = %e, "Malformed Atom document; keeping entries parsed so far");
                break;
            }
            _ => {}
        }
    }

    records
}

/// Copy the named attribute's value into `target` if it is still empty, so
/// only the first `<link>`/`<category>` of an entry counts.
fn capture_first_attr(element: &BytesStart<'_>, name: &[u8], target: &mut String) {
    if !target.is_empty() {
        return;
    }
    let value = element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok());
    if let Some(value) = value {
        target.push_str(value.trim());
    }
}

fn build_record(title: &str, link: &str, updated: &str, category: &str) -> Option<Record> {
    let title = title.trim();
    let link = link.trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }
    let tags: Vec<String> = if category.trim().is_empty() {
        Vec::new()
    } else {
        vec![category.trim().to_string()]
    };
    Some(Record {
        source_group: SourceGroup::Naver,
        source_name: SOURCE_NAME,
        title: title.to_string(),
        canonical_link: normalize_url(link),
        published_at: normalize_instant(updated),
        topic: classify(title, &tags),
        tags,
        provenance: format!("title={title}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::EPOCH;
    use crate::models::Topic;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>D2 Feed</title>
  <entry>
    <title>React 18 마이그레이션</title>
    <link href="https://d2.naver.com/helloworld/101?utm=feed"/>
    <updated>2025-06-15T10:00:00+09:00</updated>
    <category term="frontend"/>
  </entry>
  <entry>
    <title>  </title>
    <link href="https://d2.naver.com/helloworld/102"/>
    <updated>2025-06-16T10:00:00+09:00</updated>
  </entry>
  <entry>
    <title>No link entry</title>
    <updated>2025-06-17T10:00:00+09:00</updated>
  </entry>
  <entry>
    <title>Untagged &amp; undated</title>
    <link href="https://D2.naver.com//helloworld//103/"/>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_feed_maps_complete_entries() {
        let records = parse_feed(FEED);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.source_group, SourceGroup::Naver);
        assert_eq!(first.title, "React 18 마이그레이션");
        assert_eq!(first.canonical_link, "https://d2.naver.com/helloworld/101");
        assert_eq!(first.published_at.to_rfc3339(), "2025-06-15T01:00:00+00:00");
        assert_eq!(first.topic, Topic::Frontend);
        assert_eq!(first.tags, vec!["frontend".to_string()]);
        assert_eq!(first.provenance, "title=React 18 마이그레이션");
    }

    #[test]
    fn test_parse_feed_skips_items_without_title_or_link() {
        let records = parse_feed(FEED);
        assert!(records.iter().all(|r| !r.title.is_empty()));
        assert!(records.iter().all(|r| !r.canonical_link.is_empty()));
        assert!(!records.iter().any(|r| r.title == "No link entry"));
    }

    #[test]
    fn test_parse_feed_missing_date_becomes_epoch() {
        let records = parse_feed(FEED);
        let undated = records.iter().find(|r| r.title == "Untagged & undated").unwrap();
        assert_eq!(undated.published_at, EPOCH);
        assert!(undated.tags.is_empty());
        assert_eq!(undated.canonical_link, "https://d2.naver.com/helloworld/103");
    }

    #[test]
    fn test_parse_feed_tolerates_malformed_document() {
        let records = parse_feed("<feed><entry><title>busted");
        assert!(records.is_empty());
    }
}
