//! if(kakao) conference session scraper.
//!
//! The if.kakao site exposes two public JSON endpoints: one with the full
//! session content map and one with event metadata. Sessions carry no
//! per-item timestamp, so every record gets the event's start date (midnight
//! KST, normalized to UTC).

use crate::canonical::{normalize_instant, normalize_url};
use crate::classify::classify;
use crate::models::{Record, SourceGroup};
use crate::net::Http;
use serde_json::Value;
use std::error::Error;
use tracing::{info, instrument};

const CONTENTS_URL: &str = "https://if.kakao.com/api/v1/contents";
const EVENT_URL: &str = "https://if.kakao.com/api/v1/events/2025";
const DEFAULT_EVENT_START: &str = "2025-01-01";
const SOURCE_NAME: &str = "if(kakao)";

/// Fetch session metadata and map it into records.
#[instrument(level = "info", skip_all)]
pub async fn fetch_records(http: &Http) -> Result<Vec<Record>, Box<dyn Error>> {
    let contents = http.get_json(CONTENTS_URL).await?;
    let event = http.get_json(EVENT_URL).await?;
    let event_start = event
        .pointer("/data/event/startDate")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_EVENT_START);
    let records = map_sessions(&contents, event_start);
    info!(count = records.len(), event_start, "Collected KAKAO records");
    Ok(records)
}

/// Map the contents payload into records.
///
/// The payload groups sessions under `data.contentMap`, keyed by display
/// slot; only list-valued slots are walked. Items without a session id or
/// title are skipped. Tags merge the item's tag names, category names, and
/// its `typeOptionName`, in that order.
pub fn map_sessions(contents: &Value, event_start: &str) -> Vec<Record> {
    let published_at = normalize_instant(&format!("{event_start}T00:00:00+09:00"));
    let mut records = Vec::new();

    let Some(content_map) = contents.pointer("/data/contentMap").and_then(Value::as_object) else {
        return records;
    };

    for slot_items in content_map.values() {
        let Some(items) = slot_items.as_array() else {
            continue;
        };
        for item in items {
            let seq = item.get("seq").and_then(Value::as_i64).filter(|seq| *seq != 0);
            let title = item
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim();
            let Some(seq) = seq else {
                continue;
            };
            if title.is_empty() {
                continue;
            }

            let tags = merged_tags(item);
            let link = normalize_url(&format!("https://if.kakao.com/session/{seq}"));
            records.push(Record {
                source_group: SourceGroup::Kakao,
                source_name: SOURCE_NAME,
                title: title.to_string(),
                canonical_link: link,
                published_at,
                topic: classify(title, &tags),
                tags,
                provenance: format!("sessionId={seq}"),
            });
        }
    }

    records
}

/// Tag names, then category names, then the session type label.
fn merged_tags(item: &Value) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for key in ["tags", "categories"] {
        if let Some(entries) = item.get(key).and_then(Value::as_array) {
            for entry in entries {
                if let Some(name) = entry.get("name").and_then(Value::as_str) {
                    let name = name.trim();
                    if !name.is_empty() {
                        tags.push(name.to_string());
                    }
                }
            }
        }
    }
    if let Some(type_option) = item.get("typeOptionName").and_then(Value::as_str) {
        let type_option = type_option.trim();
        if !type_option.is_empty() {
            tags.push(type_option.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "data": {
                "contentMap": {
                    "keynote": [
                        {
                            "seq": 101,
                            "title": "프론트엔드 플랫폼의 미래",
                            "tags": [{"name": "web"}, {"name": ""}],
                            "categories": [{"name": "Tech"}],
                            "typeOptionName": "Session"
                        },
                        {
                            "seq": 0,
                            "title": "Dropped: falsy session id"
                        },
                        {
                            "title": "Dropped: no session id"
                        },
                        {
                            "seq": 103,
                            "title": "   "
                        }
                    ],
                    "banner": "not a list"
                }
            }
        })
    }

    #[test]
    fn test_map_sessions_builds_links_and_tags() {
        let records = map_sessions(&payload(), "2025-09-23");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.source_group, SourceGroup::Kakao);
        assert_eq!(record.canonical_link, "https://if.kakao.com/session/101");
        assert_eq!(record.tags, vec!["web".to_string(), "Tech".to_string(), "Session".to_string()]);
        assert_eq!(record.provenance, "sessionId=101");
        // Midnight KST on the event start date, expressed in UTC.
        assert_eq!(record.published_at.to_rfc3339(), "2025-09-22T15:00:00+00:00");
    }

    #[test]
    fn test_map_sessions_skips_unusable_items() {
        let records = map_sessions(&payload(), "2025-09-23");
        assert!(!records.iter().any(|r| r.title.starts_with("Dropped")));
        assert!(records.iter().all(|r| !r.title.trim().is_empty()));
    }

    #[test]
    fn test_map_sessions_empty_payload() {
        assert!(map_sessions(&json!({}), "2025-01-01").is_empty());
        assert!(map_sessions(&json!({"data": {"contentMap": {}}}), "2025-01-01").is_empty());
    }
}
