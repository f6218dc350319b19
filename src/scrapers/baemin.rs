//! Woowahan (BAEMIN) tech blog scraper.
//!
//! The blog runs WordPress, so discovery goes through the standard
//! `wp-json/wp/v2/posts` endpoint with a trimmed field set. Pagination is
//! bounded: it stops on a failed request, an empty page, or the fixed page
//! ceiling, whichever comes first.

use crate::canonical::{normalize_instant, normalize_url};
use crate::classify::classify;
use crate::models::{Record, SourceGroup};
use crate::net::Http;
use serde_json::Value;
use std::error::Error;
use tracing::{info, instrument, warn};

const API_URL: &str = "https://techblog.woowahan.com/wp-json/wp/v2/posts";
const PER_PAGE: u32 = 100;
const MAX_PAGES: u32 = 10;
const SOURCE_NAME: &str = "Woowahan Tech Blog";

/// Page through the posts endpoint and map each post into a record.
#[instrument(level = "info", skip_all)]
pub async fn fetch_records(http: &Http) -> Result<Vec<Record>, Box<dyn Error>> {
    let mut records = Vec::new();
    let mut page = 1u32;
    loop {
        let url = format!("{API_URL}?per_page={PER_PAGE}&page={page}&_fields=id,date,link,title");
        let posts = match http.get_json(&url).await {
            Ok(payload) => payload,
            Err(e) => {
                // WordPress answers past-the-end pages with a 400; any
                // failed page simply ends pagination.
                warn!(page, error = %e, "BAEMIN page fetch failed; stopping pagination");
                break;
            }
        };
        let Some(posts) = posts.as_array() else {
            break;
        };
        if posts.is_empty() {
            break;
        }
        records.extend(posts.iter().filter_map(map_post));
        page += 1;
        if page > MAX_PAGES {
            break;
        }
    }

    info!(count = records.len(), pages = page, "Collected BAEMIN records");
    Ok(records)
}

/// Map one WordPress post object into a record.
///
/// Posts without a rendered title or a link are skipped. The blog exposes
/// no tag data through this field set, so tags stay empty.
pub fn map_post(post: &Value) -> Option<Record> {
    let title = post
        .pointer("/title/rendered")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();
    let link = post
        .get("link")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }
    let date = post.get("date").and_then(Value::as_str).unwrap_or_default();
    let id = post.get("id").and_then(Value::as_i64).unwrap_or_default();
    Some(Record {
        source_group: SourceGroup::Baemin,
        source_name: SOURCE_NAME,
        title: title.to_string(),
        canonical_link: normalize_url(link),
        published_at: normalize_instant(date),
        topic: classify(title, &[]),
        tags: Vec::new(),
        provenance: format!("postId={id}"),
    })
}
