//! Business criticality (BC) and business impact.
//!
//! Both use the descending keyword-bucket lookup: the highest-scoring bucket
//! with a keyword contained in the lowercase haystack wins.

use crate::config::ScoringConfig;
use crate::core::Target;

/// BC when no keyword matches
pub const DEFAULT_BC: u8 = 3;

/// Impact when neither an override nor a keyword applies
pub const DEFAULT_IMPACT: u8 = 3;

// Pure function: lowercase `name + path + impactHint`
fn build_haystack(target: &Target) -> String {
    let mut haystack = format!("{} {}", target.name, target.path);
    if let Some(hint) = target.impact_hint() {
        haystack.push(' ');
        haystack.push_str(hint);
    }
    haystack.to_lowercase()
}

/// Whether the path lies on a configured critical ("main chain") path
pub fn is_main_chain(path: &str, config: &ScoringConfig) -> bool {
    let path = path.to_lowercase();
    config
        .main_chain_paths
        .iter()
        .filter(|fragment| !fragment.is_empty())
        .any(|fragment| path.contains(&fragment.to_lowercase()))
}

/// Business criticality in `[1, 10]`
pub fn business_criticality(target: &Target, config: &ScoringConfig) -> u8 {
    if let Some(&pinned) = config.overrides.bc.get(&target.key()) {
        return pinned;
    }

    let matched = config
        .bc_keywords
        .lookup(&build_haystack(target))
        .unwrap_or(DEFAULT_BC);

    if is_main_chain(&target.path, config) {
        matched
    } else {
        matched.min(config.bc_cap_for_non_main_chain)
    }
}

/// Business impact used as the ER matrix column
pub fn business_impact(target: &Target, config: &ScoringConfig) -> u8 {
    let pinned = config
        .impact_overrides
        .get(&target.key())
        .or_else(|| config.impact_overrides.get(&target.path));
    if let Some(&impact) = pinned {
        return impact;
    }

    target
        .impact_hint()
        .and_then(|hint| config.impact_keywords.lookup(&hint.to_lowercase()))
        .unwrap_or(DEFAULT_IMPACT)
}
