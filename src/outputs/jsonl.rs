//! Line-delimited JSON output.
//!
//! One JSON object per line, UTF-8 with non-ASCII characters emitted
//! literally, and line order equal to input order (the input is already in
//! final ranked order). Output failures propagate: they are the only class
//! of error that aborts a run.

use crate::models::{Record, SourceGroup, Topic};
use chrono::SecondsFormat;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Wire form of one corpus record.
///
/// Field names and order are the dataset contract; `pattern` is a reserved
/// placeholder column and always empty.
#[derive(Serialize)]
struct Row<'a> {
    company: SourceGroup,
    source: &'a str,
    title: &'a str,
    link: &'a str,
    date: String,
    topic: Topic,
    tags: &'a [String],
    pattern: &'static str,
    evidence: &'a str,
}

impl<'a> From<&'a Record> for Row<'a> {
    fn from(record: &'a Record) -> Self {
        Row {
            company: record.source_group,
            source: record.source_name,
            title: &record.title,
            link: &record.canonical_link,
            date: record
                .published_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            topic: record.topic,
            tags: &record.tags,
            pattern: "",
            evidence: &record.provenance,
        }
    }
}

/// Write corpus records as JSONL.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_records(records: &[Record], path: &Path) -> Result<(), Box<dyn Error>> {
    let rows: Vec<Row<'_>> = records.iter().map(Row::from).collect();
    write_rows(&rows, path).await
}

/// Write any serializable rows as JSONL, one object per line.
pub async fn write_rows<T: Serialize>(rows: &[T], path: &Path) -> Result<(), Box<dyn Error>> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, out).await?;
    info!(path = %path.display(), lines = rows.len(), "Wrote JSONL file");
    Ok(())
}
