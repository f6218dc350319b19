//! Coupang Engineering Medium feed scraper.
//!
//! Medium serves a standard RSS 2.0 feed. Item titles and categories arrive
//! as CDATA, links as plain text, and `pubDate` in RFC-2822 form. Medium
//! appends tracking query strings to links; those are stripped before
//! canonicalization so the same post always keys identically.

use crate::canonical::{normalize_instant, normalize_url};
use crate::classify::classify;
use crate::models::{Record, SourceGroup};
use crate::net::Http;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::error::Error;
use tracing::{info, instrument, warn};

const FEED_URL: &str = "https://medium.com/feed/coupang-engineering";
const SOURCE_NAME: &str = "Coupang Engineering (Medium)";

/// Fetch the Medium feed and map its items into records.
#[instrument(level = "info", skip_all)]
pub async fn fetch_records(http: &Http) -> Result<Vec<Record>, Box<dyn Error>> {
    let xml = http.get_text(FEED_URL).await?;
    let records = parse_feed(&xml);
    info!(count = records.len(), "Collected COUPANG records");
    Ok(records)
}

/// Which text-bearing item element the reader is currently inside.
enum Field {
    Title,
    Link,
    PubDate,
    Category,
}

/// Map RSS feed text into records.
///
/// Items missing a usable title or link are skipped; a missing or
/// unparseable `pubDate` falls back to the epoch sentinel.
pub fn parse_feed(xml: &str) -> Vec<Record> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut in_item = false;
    let mut field: Option<Field> = None;
    let mut title = String::new();
    let mut link = String::new();
    let mut pub_date = String::new();
    let mut categories: Vec<String> = Vec::new();
    let mut category = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    link.clear();
                    pub_date.clear();
                    categories.clear();
                }
                b"title" if in_item => field = Some(Field::Title),
                b"link" if in_item => field = Some(Field::Link),
                b"pubDate" if in_item => field = Some(Field::PubDate),
                b"category" if in_item => {
                    category.clear();
                    field = Some(Field::Category);
                }
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let (Some(f), Ok(text)) = (&field, t.xml_content()) {
                    append_text(f, &text, &mut title, &mut link, &mut pub_date, &mut category);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(ref f) = field {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    append_text(f, &text, &mut title, &mut link, &mut pub_date, &mut category);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"item" => {
                    in_item = false;
                    if let Some(record) = build_record(&title, &link, &pub_date, &categories) {
                        records.push(record);
                    }
                }
                b"category" => {
                    let trimmed = category.trim();
                    if in_item && !trimmed.is_empty() {
                        categories.push(trimmed.to_string());
                    }
                    field = None;
                }
                b"title" | b"link" | b"pubDate" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(error = %e, "Malformed RSS document; keeping items parsed so far");
                break;
            }
            _ => {}
        }
    }

    records
}

fn append_text(
    field: &Field,
    text: &str,
    title: &mut String,
    link: &mut String,
    pub_date: &mut String,
    category: &mut String,
) {
    match field {
        Field::Title => title.push_str(text),
        Field::Link => link.push_str(text),
        Field::PubDate => pub_date.push_str(text),
        Field::Category => category.push_str(text),
    }
}

fn build_record(title: &str, link: &str, pub_date: &str, categories: &[String]) -> Option<Record> {
    let title = title.trim();
    let link = link.trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }
    // Medium links carry `?source=rss...`; key on the bare article URL.
    let bare_link = link.split('?').next().unwrap_or(link);
    let tags = categories.to_vec();
    Some(Record {
        source_group: SourceGroup::Coupang,
        source_name: SOURCE_NAME,
        title: title.to_string(),
        canonical_link: normalize_url(bare_link),
        published_at: normalize_instant(pub_date),
        topic: classify(title, &tags),
        tags,
        provenance: format!("title={title}"),
    })
}
