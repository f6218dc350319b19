//! Keyword-based topic classification.
//!
//! Titles and tags are matched against a static, priority-ordered keyword
//! table. The classifier is a heuristic: it contracts determinism and
//! reproducibility, not accuracy. Keeping the table as data (rather than
//! branching per source) keeps classification source-agnostic and
//! independently testable.

use crate::models::Topic;

/// Category keyword table in priority order.
///
/// Ties between categories resolve to the earlier entry, so the order here
/// is part of the classifier's contract. Keywords mix English and Korean
/// because the source blogs publish in both.
pub const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Frontend,
        &[
            "frontend",
            "front-end",
            "프론트엔드",
            "web",
            "react",
            "next.js",
            "javascript",
            "typescript",
            "ui 개발",
            "client",
        ],
    ),
    (
        Topic::Uiux,
        &[
            "ux",
            "ui",
            "사용자 경험",
            "접근성",
            "a11y",
            "인터랙션",
            "usability",
            "research",
        ],
    ),
    (
        Topic::Design,
        &[
            "design",
            "디자인",
            "design system",
            "디자인 시스템",
            "token",
            "토큰",
            "컴포넌트",
            "component",
        ],
    ),
];

/// Classify a record by title and tags.
///
/// Concatenates title and tags into one lowercase haystack and counts, per
/// category, how many of its keywords occur as substrings. The best-scoring
/// category wins; ties go to the category listed first in
/// [`TOPIC_KEYWORDS`]. A best score of zero yields [`Topic::Other`].
pub fn classify(title: &str, tags: &[String]) -> Topic {
    let haystack = format!("{} {}", title, tags.join(" ")).to_lowercase();
    let mut best = Topic::Other;
    let mut best_score = 0usize;
    for (topic, keywords) in TOPIC_KEYWORDS {
        let score = keywords.iter().filter(|kw| haystack.contains(*kw)).count();
        if score > best_score {
            best_score = score;
            best = *topic;
        }
    }
    best
}
