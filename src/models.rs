//! Data models for collected blog posts.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`SourceGroup`]: The closed set of originating organizations
//! - [`Topic`]: The closed set of inferred topic categories
//! - [`Record`]: One discovered blog post or conference session
//!
//! A [`Record`] is created once by a source scraper, is never mutated
//! afterwards, and is identified by its canonical link: two records sharing a
//! canonical link are the same entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The originating organization of a record.
///
/// The variant order is the fixed priority order used everywhere groups are
/// iterated: quota selection, remainder gathering, and summary reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceGroup {
    Naver,
    Kakao,
    Line,
    Coupang,
    Baemin,
}

impl SourceGroup {
    /// All groups in priority order.
    pub const ALL: [SourceGroup; 5] = [
        SourceGroup::Naver,
        SourceGroup::Kakao,
        SourceGroup::Line,
        SourceGroup::Coupang,
        SourceGroup::Baemin,
    ];

    /// The serialized form of the group name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceGroup::Naver => "NAVER",
            SourceGroup::Kakao => "KAKAO",
            SourceGroup::Line => "LINE",
            SourceGroup::Coupang => "COUPANG",
            SourceGroup::Baemin => "BAEMIN",
        }
    }
}

impl fmt::Display for SourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heuristically inferred topic label.
///
/// `Other` is the fallback when no category keyword matches. The label is
/// derived metadata, not authoritative: only determinism is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Frontend,
    Uiux,
    Design,
    Other,
}

impl Topic {
    /// The serialized form of the topic name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Frontend => "frontend",
            Topic::Uiux => "uiux",
            Topic::Design => "design",
            Topic::Other => "other",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered blog post or session, regardless of source.
///
/// # Invariants
///
/// After a scraper emits a record:
/// - `title` and `canonical_link` are non-empty (items failing this are
///   skipped at scraper level)
/// - `published_at` is always a valid UTC instant; unresolvable dates are
///   normalized to the Unix epoch so sort ordering stays total
/// - `topic` is always a member of the closed category set
///
/// `provenance` records which native field identified the item (for example
/// `sessionId=1234` or `postId=567`), for auditability.
#[derive(Debug, Clone)]
pub struct Record {
    /// The originating organization.
    pub source_group: SourceGroup,
    /// Human label of the specific feed or API within the group.
    pub source_name: &'static str,
    /// Display title, non-empty after trimming.
    pub title: String,
    /// Normalized URL used as the record's identity key.
    pub canonical_link: String,
    /// Publication instant in UTC; the Unix epoch when unresolvable.
    pub published_at: DateTime<Utc>,
    /// Inferred topic category.
    pub topic: Topic,
    /// Free-text labels from the source, order-preserving.
    pub tags: Vec<String>,
    /// How the record was identified, e.g. `title=...` or `slug=...`.
    pub provenance: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_source_group_order_is_priority_order() {
        assert_eq!(SourceGroup::ALL[0], SourceGroup::Naver);
        assert_eq!(SourceGroup::ALL[4], SourceGroup::Baemin);
        assert_eq!(SourceGroup::ALL.len(), 5);
    }

    #[test]
    fn test_source_group_serialization() {
        let json = serde_json::to_string(&SourceGroup::Coupang).unwrap();
        assert_eq!(json, "\"COUPANG\"");
        let parsed: SourceGroup = serde_json::from_str("\"BAEMIN\"").unwrap();
        assert_eq!(parsed, SourceGroup::Baemin);
    }

    #[test]
    fn test_topic_serialization() {
        assert_eq!(serde_json::to_string(&Topic::Uiux).unwrap(), "\"uiux\"");
        assert_eq!(serde_json::to_string(&Topic::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_record_creation() {
        let record = Record {
            source_group: SourceGroup::Naver,
            source_name: "D2",
            title: "Hello Rust".to_string(),
            canonical_link: "https://d2.naver.com/helloworld/1".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            topic: Topic::Frontend,
            tags: vec!["web".to_string()],
            provenance: "title=Hello Rust".to_string(),
        };
        assert_eq!(record.source_group.as_str(), "NAVER");
        assert_eq!(record.tags.len(), 1);
    }
}
