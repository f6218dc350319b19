//! Quota-balanced sample selection.
//!
//! Selection runs in two passes over the per-group pools (each pool already
//! recency-sorted and deduplicated):
//!
//! 1. **Quota pass** — in fixed group priority order, take up to the
//!    per-group minimum from each pool. This guarantees cross-source
//!    fairness before global ranking dilutes it.
//! 2. **Remainder fill** — gather everything not yet selected, re-sort by
//!    the recency rule, and append until the target count is reached.
//!
//! The remainder fill deliberately has no per-group cap: a highly recent
//! record from a group that already met its quota can still be added.

use crate::dedupe::sort_records;
use crate::models::{Record, SourceGroup};
use std::collections::HashSet;
use tracing::debug;

/// Select at most `target_count` records across the given pools.
///
/// `pools` must be in group priority order, each pool recency-sorted and
/// deduplicated. Selection membership is tracked by canonical link, so a
/// link appearing in several pools is only ever taken once.
///
/// The output can be shorter than `target_count` when the pools cannot
/// supply enough records; that is an acceptable result, not an error.
pub fn select_records(
    pools: &[(SourceGroup, Vec<Record>)],
    target_count: usize,
    min_per_source: usize,
) -> Vec<Record> {
    let mut selected: Vec<Record> = Vec::new();
    let mut selected_links: HashSet<String> = HashSet::new();

    for (group, pool) in pools {
        let mut taken = 0usize;
        for record in pool {
            if selected_links.contains(&record.canonical_link) {
                continue;
            }
            selected_links.insert(record.canonical_link.clone());
            selected.push(record.clone());
            taken += 1;
            if taken >= min_per_source {
                break;
            }
        }
        debug!(%group, taken, "Quota pass for group");
    }

    if selected.len() >= target_count {
        selected.truncate(target_count);
        return selected;
    }

    let mut extras: Vec<Record> = Vec::new();
    for (_, pool) in pools {
        for record in pool {
            if selected_links.contains(&record.canonical_link) {
                continue;
            }
            extras.push(record.clone());
        }
    }

    let extras = sort_records(extras);
    for record in extras {
        if selected.len() >= target_count {
            break;
        }
        if selected_links.contains(&record.canonical_link) {
            continue;
        }
        selected_links.insert(record.canonical_link.clone());
        selected.push(record);
    }

    selected.truncate(target_count);
    selected
}
