//! Run configuration for both pipelines.
//!
//! Destination paths and tunable constants live in explicit structs handed
//! to the pipeline functions, so each pipeline stays callable and testable
//! without touching global state. The CLI layer is the only place that
//! constructs these from user input.

use std::path::PathBuf;

/// Configuration for the five-source corpus pipeline.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Upper bound on the final sample size.
    pub target_count: usize,
    /// Per-group minimum guaranteed during the quota pass, when available.
    pub min_per_source: usize,
    /// Per-request timeout budget in seconds.
    pub timeout_secs: u64,
    /// Destination of the JSONL dataset.
    pub jsonl_path: PathBuf,
    /// Destination of the Markdown summary report.
    pub summary_path: PathBuf,
}

/// Configuration for the article analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Markdown file listing the article URLs to analyze.
    pub corpus_path: PathBuf,
    /// Destination of the per-article JSONL dataset.
    pub jsonl_path: PathBuf,
    /// Destination of the aggregate JSON summary.
    pub summary_path: PathBuf,
    /// Per-request timeout budget in seconds.
    pub timeout_secs: u64,
    /// Maximum article fetches in flight at once.
    pub max_in_flight: usize,
}
