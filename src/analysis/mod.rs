//! Article-corpus analysis pipeline.
//!
//! A structurally smaller sibling of the corpus pipeline: one source
//! instead of five. The input is a local Markdown file listing toss.tech
//! article URLs; each article body is fetched, tokenized, and scored
//! against a fixed category keyword table, and the run ends with a JSONL
//! dataset plus an aggregate JSON summary.
//!
//! Per-article failures (transport errors, non-2xx responses) drop that
//! article from the dataset; a partial result set is an acceptable outcome.

use crate::net::Http;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use tracing::{debug, instrument};

/// Article URLs recognized in the corpus file.
static ARTICLE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https://toss\.tech/article/[A-Za-z0-9_-]+").unwrap());

/// English words of three-plus characters, or Korean blocks of two-plus
/// syllables. Everything else is noise for scoring purposes.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_-]{2,}|[가-힣]{2,}").unwrap());

const UIUX_KEYWORDS: &[&str] = &[
    "ux",
    "ui",
    "사용자",
    "인터랙션",
    "리서치",
    "문구",
    "에러",
    "리옵스",
    "디자인",
    "접근성",
];
const FRONTEND_KEYWORDS: &[&str] = &[
    "frontend",
    "프론트엔드",
    "react",
    "react native",
    "web",
    "배포",
    "테스트",
    "eslint",
    "sdk",
    "코드 리뷰",
];
const DESIGN_SYSTEM_KEYWORDS: &[&str] = &[
    "design system",
    "디자인 시스템",
    "token",
    "토큰",
    "tds",
    "컬러 시스템",
    "컴포넌트",
    "component",
];
const QUALITY_KEYWORDS: &[&str] = &[
    "품질",
    "테스트",
    "qa",
    "e2e",
    "안정화",
    "신뢰성",
    "회귀",
    "로깅",
    "모니터링",
];

const TOP_KEYWORD_COUNT: usize = 12;
const EXCERPT_TOKEN_COUNT: usize = 120;
const MIN_KEYWORD_CHARS: usize = 3;

/// Per-category keyword hit counts for one article.
///
/// A struct rather than a map so the JSON field order is fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub uiux: usize,
    pub frontend: usize,
    pub design_system: usize,
    pub quality: usize,
}

impl CategoryScores {
    fn add(&mut self, other: &CategoryScores) {
        self.uiux += other.uiux;
        self.frontend += other.frontend;
        self.design_system += other.design_system;
        self.quality += other.quality;
    }
}

/// One analyzed article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    pub word_count: usize,
    pub category_scores: CategoryScores,
    pub top_keywords: Vec<String>,
    pub excerpt: String,
}

/// Aggregate statistics over an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub generated_at_utc: String,
    pub article_count: usize,
    pub category_totals: CategoryScores,
    pub avg_word_count: f64,
    pub max_word_count: usize,
    pub min_word_count: usize,
}

/// Extract the sorted, deduplicated set of article URLs from corpus
/// Markdown.
pub fn extract_urls(markdown: &str) -> Vec<String> {
    let unique: BTreeSet<&str> = ARTICLE_URL_RE
        .find_iter(markdown)
        .map(|m| m.as_str())
        .collect();
    unique.into_iter().map(str::to_string).collect()
}

/// Split text into scoring tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Fetch one article and analyze its body.
///
/// # Errors
///
/// Returns an error on transport failure or a non-2xx response; the caller
/// drops the article and continues.
#[instrument(level = "debug", skip(http))]
pub async fn fetch_article(http: &Http, url: &str) -> Result<ArticleRecord, Box<dyn Error>> {
    let html = http.get_text(url).await?;
    let record = analyze_article(url, &html);
    debug!(word_count = record.word_count, "Analyzed article");
    Ok(record)
}

/// Analyze one article's HTML.
///
/// Title preference: first `<h1>`, then `<title>`, then empty. Body
/// preference: the `<article>` element, then the whole document. All
/// whitespace runs collapse to single spaces before tokenization.
pub fn analyze_article(url: &str, html: &str) -> ArticleRecord {
    let document = Html::parse_document(html);
    let h1_selector = Selector::parse("h1").unwrap();
    let title_selector = Selector::parse("title").unwrap();
    let article_selector = Selector::parse("article").unwrap();

    let title = document
        .select(&h1_selector)
        .next()
        .or_else(|| document.select(&title_selector).next())
        .map(|el| collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default();

    let body = document
        .select(&article_selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .unwrap_or_else(|| document.root_element().text().collect::<Vec<_>>().join(" "));
    let normalized = collapse_whitespace(&body);

    let tokens = tokenize(&normalized);
    let lowered = normalized.to_lowercase();

    ArticleRecord {
        url: url.to_string(),
        title,
        word_count: tokens.len(),
        category_scores: score_categories(&lowered),
        top_keywords: top_keywords(&tokens),
        excerpt: tokens
            .iter()
            .take(EXCERPT_TOKEN_COUNT)
            .copied()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Count keyword hits per category over a lowercased haystack.
pub fn score_categories(lowered: &str) -> CategoryScores {
    CategoryScores {
        uiux: count_hits(lowered, UIUX_KEYWORDS),
        frontend: count_hits(lowered, FRONTEND_KEYWORDS),
        design_system: count_hits(lowered, DESIGN_SYSTEM_KEYWORDS),
        quality: count_hits(lowered, QUALITY_KEYWORDS),
    }
}

fn count_hits(haystack: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| haystack.contains(*kw)).count()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The most frequent lowercased tokens of [`MIN_KEYWORD_CHARS`]-plus
/// characters, most frequent first, ties alphabetical.
fn top_keywords(tokens: &[&str]) -> Vec<String> {
    let mut frequencies: BTreeMap<String, usize> = BTreeMap::new();
    for token in tokens {
        let key = token.to_lowercase();
        if key.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        *frequencies.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = frequencies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_KEYWORD_COUNT)
        .map(|(token, _)| token)
        .collect()
}

/// Aggregate per-article rows into run statistics.
pub fn summarize(rows: &[ArticleRecord], generated_at: DateTime<Utc>) -> AnalysisSummary {
    let mut category_totals = CategoryScores::default();
    for row in rows {
        category_totals.add(&row.category_scores);
    }
    let word_total: usize = rows.iter().map(|r| r.word_count).sum();
    let avg = word_total as f64 / rows.len().max(1) as f64;

    AnalysisSummary {
        generated_at_utc: generated_at.to_rfc3339(),
        article_count: rows.len(),
        category_totals,
        avg_word_count: (avg * 100.0).round() / 100.0,
        max_word_count: rows.iter().map(|r| r.word_count).max().unwrap_or(0),
        min_word_count: rows.iter().map(|r| r.word_count).min().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extract_urls_sorted_unique() {
        let markdown = "\
            - https://toss.tech/article/zebra-post\n\
            - https://toss.tech/article/alpha_post\n\
            - https://toss.tech/article/zebra-post again\n\
            - https://example.com/not-toss\n";
        assert_eq!(
            extract_urls(markdown),
            vec![
                "https://toss.tech/article/alpha_post".to_string(),
                "https://toss.tech/article/zebra-post".to_string(),
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_english_and_korean() {
        let tokens = tokenize("React Native 앱의 접근성 개선 at v2");
        assert_eq!(tokens, vec!["React", "Native", "앱의", "접근성", "개선"]);
    }

    #[test]
    fn test_analyze_article_prefers_h1_and_article_body() {
        let html = "<html><head><title>Head title</title></head>\
            <body><h1>UX  리서치  노트</h1>\
            <article>우리는 디자인 시스템 token 정리를 했다. component 문서화.</article>\
            <footer>boilerplate nav text</footer></body></html>";
        let record = analyze_article("https://toss.tech/article/ux-note", html);
        assert_eq!(record.title, "UX 리서치 노트");
        assert!(record.excerpt.starts_with("우리는 디자인"));
        assert!(!record.excerpt.contains("boilerplate"));
        // "디자인 시스템", "token", and "component" each hit once.
        assert_eq!(record.category_scores.design_system, 3);
    }

    #[test]
    fn test_analyze_article_falls_back_to_title_and_document() {
        let html = "<html><head><title>Fallback title</title></head>\
            <body><p>plain body text here</p></body></html>";
        let record = analyze_article("https://toss.tech/article/fallback", html);
        assert_eq!(record.title, "Fallback title");
        assert!(record.word_count > 0);
    }

    #[test]
    fn test_top_keywords_ranked_by_frequency() {
        let tokens = vec!["rust", "rust", "rust", "tokio", "tokio", "serde", "ab"];
        let keywords = top_keywords(&tokens);
        assert_eq!(keywords[0], "rust");
        assert_eq!(keywords[1], "tokio");
        // Two-character tokens never rank.
        assert!(!keywords.contains(&"ab".to_string()));
    }

    #[test]
    fn test_top_keywords_short_korean_tokens_dropped() {
        // Korean blocks of two syllables tokenize but stay under the
        // three-character ranking floor.
        let tokens = vec!["토큰", "토큰", "컴포넌트"];
        assert_eq!(top_keywords(&tokens), vec!["컴포넌트".to_string()]);
    }

    #[test]
    fn test_summarize_stats() {
        let rows = vec![
            ArticleRecord {
                url: "https://toss.tech/article/a".to_string(),
                title: "a".to_string(),
                word_count: 100,
                category_scores: CategoryScores { uiux: 2, frontend: 1, design_system: 0, quality: 1 },
                top_keywords: vec![],
                excerpt: String::new(),
            },
            ArticleRecord {
                url: "https://toss.tech/article/b".to_string(),
                title: "b".to_string(),
                word_count: 33,
                category_scores: CategoryScores { uiux: 1, frontend: 0, design_system: 3, quality: 0 },
                top_keywords: vec![],
                excerpt: String::new(),
            },
        ];
        let generated_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let summary = summarize(&rows, generated_at);
        assert_eq!(summary.article_count, 2);
        assert_eq!(summary.avg_word_count, 66.5);
        assert_eq!(summary.max_word_count, 100);
        assert_eq!(summary.min_word_count, 33);
        assert_eq!(summary.category_totals.uiux, 3);
        assert_eq!(summary.category_totals.design_system, 3);
        assert_eq!(summary.generated_at_utc, "2026-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(summary.article_count, 0);
        assert_eq!(summary.avg_word_count, 0.0);
        assert_eq!(summary.max_word_count, 0);
        assert_eq!(summary.min_word_count, 0);
    }
}
