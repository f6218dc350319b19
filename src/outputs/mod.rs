//! Output generation for both pipelines.
//!
//! - [`jsonl`]: line-delimited JSON datasets
//! - [`summary`]: the corpus Markdown report and the analysis JSON summary
//!
//! Output writing is the only stage whose errors abort a run; everything
//! upstream degrades to "fewer records" instead.

pub mod jsonl;
pub mod summary;
