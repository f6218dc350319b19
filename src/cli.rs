//! Command-line interface definitions.
//!
//! One subcommand per pipeline. Every option has a default, so both
//! pipelines run with no arguments beyond the subcommand name.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the corpus builder.
///
/// # Examples
///
/// ```sh
/// # Build the five-source corpus with defaults
/// techblog_corpus corpus
///
/// # Smaller sample, custom output location
/// techblog_corpus corpus --target-count 40 --jsonl-path /tmp/corpus.jsonl
///
/// # Score the toss.tech article corpus
/// techblog_corpus articles --corpus-path docs/toss-article-corpus.md
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the deduplicated, topic-classified five-source blog corpus
    Corpus(CorpusArgs),
    /// Fetch and keyword-score the toss.tech article corpus
    Articles(ArticleArgs),
}

#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Upper bound on the final sample size
    #[arg(long, default_value_t = 100)]
    pub target_count: usize,

    /// Minimum records guaranteed per source group, when available
    #[arg(long, default_value_t = 15)]
    pub min_per_source: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 20)]
    pub timeout_secs: u64,

    /// Output path for the JSONL dataset
    #[arg(long, default_value = "docs/blog-corpus.jsonl")]
    pub jsonl_path: PathBuf,

    /// Output path for the Markdown summary report
    #[arg(long, default_value = "docs/blog-corpus-summary.md")]
    pub summary_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ArticleArgs {
    /// Markdown file listing the toss.tech article URLs
    #[arg(long, default_value = "docs/toss-article-corpus.md")]
    pub corpus_path: PathBuf,

    /// Output path for the per-article JSONL dataset
    #[arg(long, default_value = "docs/toss-analysis-data.jsonl")]
    pub jsonl_path: PathBuf,

    /// Output path for the aggregate JSON summary
    #[arg(long, default_value = "docs/toss-analysis-summary.json")]
    pub summary_path: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Maximum article fetches in flight at once
    #[arg(long, default_value_t = 16)]
    pub max_in_flight: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_defaults() {
        let cli = Cli::parse_from(["techblog_corpus", "corpus"]);
        let Command::Corpus(args) = cli.command else {
            panic!("expected corpus subcommand");
        };
        assert_eq!(args.target_count, 100);
        assert_eq!(args.min_per_source, 15);
        assert_eq!(args.timeout_secs, 20);
        assert_eq!(args.jsonl_path, PathBuf::from("docs/blog-corpus.jsonl"));
    }

    #[test]
    fn test_corpus_overrides() {
        let cli = Cli::parse_from([
            "techblog_corpus",
            "corpus",
            "--target-count",
            "40",
            "--jsonl-path",
            "/tmp/c.jsonl",
        ]);
        let Command::Corpus(args) = cli.command else {
            panic!("expected corpus subcommand");
        };
        assert_eq!(args.target_count, 40);
        assert_eq!(args.jsonl_path, PathBuf::from("/tmp/c.jsonl"));
    }

    #[test]
    fn test_articles_defaults() {
        let cli = Cli::parse_from(["techblog_corpus", "articles"]);
        let Command::Articles(args) = cli.command else {
            panic!("expected articles subcommand");
        };
        assert_eq!(args.max_in_flight, 16);
        assert_eq!(args.timeout_secs, 15);
        assert_eq!(args.corpus_path, PathBuf::from("docs/toss-article-corpus.md"));
    }
}
