//! # Tech Blog Corpus
//!
//! An aggregation pipeline that collects engineering-blog metadata from five
//! heterogeneous sources, normalizes it into a uniform record shape, and
//! emits a deduplicated, topic-classified, quota-balanced corpus as JSONL
//! plus a Markdown summary report.
//!
//! ## Sources
//!
//! - NAVER D2 (Atom feed)
//! - if(kakao) (JSON API)
//! - LINE Engineering Blog (paginated HTML)
//! - Coupang Engineering (Medium RSS)
//! - Woowahan Tech Blog (WordPress REST API)
//!
//! A second subcommand runs a structurally identical single-source pipeline
//! over the toss.tech article corpus: fetch each article, keyword-score its
//! body, and emit JSONL plus an aggregate JSON summary.
//!
//! ## Usage
//!
//! ```sh
//! techblog_corpus corpus
//! techblog_corpus articles
//! ```
//!
//! ## Architecture
//!
//! The corpus pipeline runs in four stages:
//! 1. **Collection**: All five source scrapers run concurrently; a failing
//!    source costs only its own pool
//! 2. **Normalization**: Each pool is recency-sorted and deduplicated by
//!    canonical link
//! 3. **Selection**: A per-group quota pass followed by a global recency
//!    fill, bounded by the target count
//! 4. **Output**: JSONL dataset and Markdown summary; only this stage can
//!    fail the run

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod canonical;
mod classify;
mod cli;
mod config;
mod dedupe;
mod models;
mod net;
mod outputs;
mod scrapers;
mod select;
mod utils;

use analysis::ArticleRecord;
use cli::{ArticleArgs, Cli, Command, CorpusArgs};
use config::{AnalysisConfig, CorpusConfig};
use dedupe::{dedupe_records, sort_records};
use models::{Record, SourceGroup};
use net::Http;
use select::select_records;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    match args.command {
        Command::Corpus(args) => run_corpus(corpus_config(args)).await,
        Command::Articles(args) => run_articles(analysis_config(args)).await,
    }
}

fn corpus_config(args: CorpusArgs) -> CorpusConfig {
    CorpusConfig {
        target_count: args.target_count,
        min_per_source: args.min_per_source,
        timeout_secs: args.timeout_secs,
        jsonl_path: args.jsonl_path,
        summary_path: args.summary_path,
    }
}

fn analysis_config(args: ArticleArgs) -> AnalysisConfig {
    AnalysisConfig {
        corpus_path: args.corpus_path,
        jsonl_path: args.jsonl_path,
        summary_path: args.summary_path,
        timeout_secs: args.timeout_secs,
        max_in_flight: args.max_in_flight,
    }
}

/// Build the five-source corpus.
async fn run_corpus(config: CorpusConfig) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!(
        target_count = config.target_count,
        min_per_source = config.min_per_source,
        "corpus build starting up"
    );

    // Early check: output locations must be writable before any fetching.
    for path in [&config.jsonl_path, &config.summary_path] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = ensure_writable_dir(parent).await {
                    error!(
                        path = %parent.display(),
                        error = %e,
                        "Output directory is not writable (fix perms or choose a different path)"
                    );
                    return Err(e);
                }
            }
        }
    }

    let http = Http::new(config.timeout_secs)?;

    // ---- Collect from all sources concurrently ----
    let (naver, kakao, line, coupang, baemin) = tokio::join!(
        scrapers::naver::fetch_records(&http),
        scrapers::kakao::fetch_records(&http),
        scrapers::line::fetch_records(&http),
        scrapers::coupang::fetch_records(&http),
        scrapers::baemin::fetch_records(&http),
    );

    let pools: Vec<(SourceGroup, Vec<Record>)> = vec![
        (SourceGroup::Naver, prepare_pool(SourceGroup::Naver, naver)),
        (SourceGroup::Kakao, prepare_pool(SourceGroup::Kakao, kakao)),
        (SourceGroup::Line, prepare_pool(SourceGroup::Line, line)),
        (SourceGroup::Coupang, prepare_pool(SourceGroup::Coupang, coupang)),
        (SourceGroup::Baemin, prepare_pool(SourceGroup::Baemin, baemin)),
    ];

    let collected: Vec<(SourceGroup, usize)> = pools
        .iter()
        .map(|(group, pool)| (*group, pool.len()))
        .collect();
    let total_collected: usize = collected.iter().map(|(_, count)| count).sum();
    info!(total = total_collected, "Collection completed");

    // ---- Select the balanced sample ----
    let selected = select_records(&pools, config.target_count, config.min_per_source);
    let mut selected = dedupe_records(sort_records(selected));
    selected.truncate(config.target_count);
    info!(count = selected.len(), "Selection completed");

    // ---- Output ----
    outputs::jsonl::write_records(&selected, &config.jsonl_path).await?;
    outputs::summary::write_corpus_summary(&config, &collected, &selected).await?;

    for (group, collected_count) in &collected {
        let selected_count = selected
            .iter()
            .filter(|record| record.source_group == *group)
            .count();
        info!(%group, selected = selected_count, collected = collected_count, "Coverage");
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");
    Ok(())
}

/// Unwrap one scraper's result, then recency-sort and deduplicate its pool.
///
/// A failed scraper contributes an empty pool instead of failing the run;
/// the summary still reports the group with a zero count.
fn prepare_pool(group: SourceGroup, result: Result<Vec<Record>, Box<dyn Error>>) -> Vec<Record> {
    match result {
        Ok(records) => dedupe_records(sort_records(records)),
        Err(e) => {
            error!(%group, error = %e, "Source unavailable; continuing without it");
            Vec::new()
        }
    }
}

/// Fetch and keyword-score the toss.tech article corpus.
async fn run_articles(config: AnalysisConfig) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    let markdown = tokio::fs::read_to_string(&config.corpus_path).await.map_err(|e| {
        error!(path = %config.corpus_path.display(), error = %e, "Cannot read article corpus file");
        e
    })?;
    let urls = analysis::extract_urls(&markdown);
    info!(count = urls.len(), "Indexed article URLs");

    let http = Http::new(config.timeout_secs)?;

    // Fetch articles concurrently, bounded; failed fetches are dropped.
    let results: Vec<Option<ArticleRecord>> = stream::iter(urls)
        .map(|url| {
            let http = http.clone();
            async move {
                match analysis::fetch_article(&http, &url).await {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(%url, error = %e, "Article fetch failed; skipping");
                        None
                    }
                }
            }
        })
        .buffer_unordered(config.max_in_flight)
        .collect()
        .await;

    let mut rows: Vec<ArticleRecord> = results.into_iter().flatten().collect();
    rows.sort_by(|a, b| a.url.cmp(&b.url));
    info!(count = rows.len(), "Article analysis completed");

    let summary = analysis::summarize(&rows, chrono::Utc::now());
    outputs::jsonl::write_rows(&rows, &config.jsonl_path).await?;
    outputs::summary::write_analysis_summary(&summary, &config.summary_path).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        articles = rows.len(),
        "Execution complete"
    );
    Ok(())
}
