//! Human-readable summary reports.
//!
//! The corpus pipeline ends with a Markdown report covering run
//! configuration, per-group coverage before and after selection, the topic
//! distribution of the selection, and fixed data-quality notes per source.
//! The analysis pipeline ends with a pretty-printed JSON summary instead.

use crate::analysis::AnalysisSummary;
use crate::config::CorpusConfig;
use crate::models::{Record, SourceGroup, Topic};
use chrono::Utc;
use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Fixed per-source caveats carried into every report.
const NOTES: [&str; 3] = [
    "LINE records come from listing-page crawling; posts without date metadata are normalized to 1970-01-01.",
    "KAKAO session metadata is collected from the public if.kakao contents API.",
    "COUPANG records come from the Medium RSS feed; link query strings are stripped.",
];

/// Write the corpus summary report.
///
/// `collected` holds per-group pool sizes at collection time, before
/// selection; `selected` is the final ranked sample.
#[instrument(level = "info", skip_all, fields(path = %config.summary_path.display()))]
pub async fn write_corpus_summary(
    config: &CorpusConfig,
    collected: &[(SourceGroup, usize)],
    selected: &[Record],
) -> Result<(), Box<dyn Error>> {
    let report = render_corpus_summary(config, collected, selected, &Utc::now().to_rfc3339());
    write_text(&config.summary_path, &report).await?;
    info!("Wrote corpus summary");
    Ok(())
}

/// Render the Markdown report. Split from the writer so the layout is
/// testable without touching the filesystem.
fn render_corpus_summary(
    config: &CorpusConfig,
    collected: &[(SourceGroup, usize)],
    selected: &[Record],
    generated_at: &str,
) -> String {
    let mut md = String::new();
    writeln!(md, "# Tech Blog Corpus Summary\n").unwrap();
    writeln!(md, "- generated_at_utc: `{generated_at}`").unwrap();
    writeln!(md, "- target_count: `{}`", config.target_count).unwrap();
    writeln!(md, "- selected_count: `{}`", selected.len()).unwrap();
    writeln!(md, "- min_per_source_target: `{}`\n", config.min_per_source).unwrap();

    writeln!(md, "## Coverage (Collected)\n").unwrap();
    for group in SourceGroup::ALL {
        let count = collected
            .iter()
            .find(|(g, _)| *g == group)
            .map_or(0, |(_, count)| *count);
        writeln!(md, "- {group}: {count}").unwrap();
    }

    writeln!(md, "\n## Coverage (Selected)\n").unwrap();
    for group in SourceGroup::ALL {
        let count = selected.iter().filter(|r| r.source_group == group).count();
        writeln!(md, "- {group}: {count}").unwrap();
    }

    writeln!(md, "\n## Topic Distribution (Selected)\n").unwrap();
    for (topic, count) in topic_distribution(selected) {
        writeln!(md, "- {topic}: {count}").unwrap();
    }

    writeln!(md, "\n## Data Files\n").unwrap();
    writeln!(md, "- `{}`", config.jsonl_path.display()).unwrap();
    writeln!(md, "- `{}`", config.summary_path.display()).unwrap();

    writeln!(md, "\n## Notes\n").unwrap();
    for note in NOTES {
        writeln!(md, "- {note}").unwrap();
    }

    md
}

/// Topics present in the selection with their counts, descending by count;
/// ties keep the fixed topic declaration order.
fn topic_distribution(selected: &[Record]) -> Vec<(Topic, usize)> {
    let mut counts: Vec<(Topic, usize)> = Vec::new();
    for topic in [Topic::Frontend, Topic::Uiux, Topic::Design, Topic::Other] {
        let count = selected.iter().filter(|r| r.topic == topic).count();
        if count > 0 {
            counts.push((topic, count));
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Write the analysis pipeline's aggregate summary as pretty JSON.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_analysis_summary(
    summary: &AnalysisSummary,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(summary)?;
    write_text(path, &json).await?;
    info!("Wrote analysis summary");
    Ok(())
}

async fn write_text(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, contents).await?;
    Ok(())
}
