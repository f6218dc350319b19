//! LINE Engineering Blog scraper.
//!
//! The blog exposes no feed or API, so discovery is pattern-based link
//! extraction from the paginated listing HTML, per locale. Listing pages
//! carry no per-post dates, so every record keeps the epoch sentinel and the
//! title is reconstructed from the post slug.
//!
//! Pagination is bounded: pages 1 through 12 per locale, never an unbounded
//! walk. The extracted slug set is deduplicated and filtered through a
//! denylist of non-article index pages (author/tag/pagination listings and
//! section roots).

use crate::canonical::{EPOCH, normalize_url};
use crate::classify::classify;
use crate::models::{Record, SourceGroup};
use crate::net::Http;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use tracing::{info, instrument, warn};

const BASE_URL: &str = "https://engineering.linecorp.com";
const LOCALES: [&str; 2] = ["en", "ko"];
const MAX_PAGES: u32 = 12;
const SOURCE_NAME: &str = "LINE Engineering Blog";

/// Section roots that match the link pattern but are not articles.
const DENYLIST: [&str; 4] = ["blog", "culture", "opensource", "careers"];

/// Crawl the listing pages for both locales and map discovered article
/// links into records.
///
/// A failed page fetch stops pagination for that locale only; whatever was
/// discovered up to that point is kept.
#[instrument(level = "info", skip_all)]
pub async fn fetch_records(http: &Http) -> Result<Vec<Record>, Box<dyn Error>> {
    let mut records = Vec::new();
    let mut seen_links: HashSet<String> = HashSet::new();

    for locale in LOCALES {
        for page in 1..=MAX_PAGES {
            let url = if page == 1 {
                format!("{BASE_URL}/{locale}/blog")
            } else {
                format!("{BASE_URL}/{locale}/blog/page/{page}")
            };
            let html = match http.get_text(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(%url, error = %e, "LINE listing page unavailable; stopping this locale");
                    break;
                }
            };
            for link in extract_links(&html, locale) {
                if !seen_links.insert(link.clone()) {
                    continue;
                }
                records.push(build_record(link, locale));
            }
        }
    }

    info!(count = records.len(), "Collected LINE records");
    Ok(records)
}

/// Extract canonical article links for one locale from listing HTML.
///
/// Matches `href="/{locale}/blog/<slug>/"`, deduplicates the slugs as a
/// set, drops denylisted and index-page slugs, and returns the survivors in
/// sorted order as canonical links.
pub fn extract_links(html: &str, locale: &str) -> Vec<String> {
    let pattern = Regex::new(&format!(r#"href="/{locale}/blog/([^"/]+)/""#)).unwrap();
    let slugs: BTreeSet<&str> = pattern
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    slugs
        .into_iter()
        .filter(|slug| {
            !slug.starts_with("author")
                && !slug.starts_with("tag")
                && !slug.starts_with("page")
                && !DENYLIST.contains(slug)
        })
        .map(|slug| normalize_url(&format!("{BASE_URL}/{locale}/blog/{slug}")))
        .collect()
}

fn build_record(link: String, locale: &str) -> Record {
    let slug = link.rsplit('/').next().unwrap_or_default().to_string();
    let title = slug.replace('-', " ").trim().to_string();
    let tags = vec![locale.to_string()];
    Record {
        source_group: SourceGroup::Line,
        source_name: SOURCE_NAME,
        title: title.clone(),
        canonical_link: link,
        published_at: EPOCH,
        topic: classify(&title, &[]),
        tags,
        provenance: format!("slug={slug}"),
    }
}
