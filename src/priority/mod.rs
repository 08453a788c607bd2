//! Score combination and the passes around it.

pub mod boost;
pub mod combiner;
pub mod overlay;

pub use boost::{apply_coverage_boost, coverage_boost_delta};
pub use combiner::{combine, floor_to_digits, Combined};
pub use overlay::SuggestionOverlay;

use crate::core::{Priority, ScoredTarget};
use std::collections::BTreeMap;

/// Number of targets per priority bucket, every bucket present
pub fn priority_counts(scored: &[ScoredTarget]) -> BTreeMap<Priority, usize> {
    let mut counts: BTreeMap<Priority, usize> =
        [Priority::P0, Priority::P1, Priority::P2, Priority::P3]
            .into_iter()
            .map(|p| (p, 0))
            .collect();
    for target in scored {
        *counts.entry(target.priority).or_insert(0) += 1;
    }
    counts
}

/// Highest score first; ties broken by `path#name` for stable output
pub fn sort_by_priority(scored: &mut [ScoredTarget]) {
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.key().cmp(&b.key()))
    });
}
