use crate::config::{first_match, ScoringConfig};
use crate::core::{DependencyGraphNode, Target};

/// Dependency-count score from the file's fan-in
pub fn dependency_count(
    target: &Target,
    node: Option<&DependencyGraphNode>,
    config: &ScoringConfig,
) -> u8 {
    if let Some(&pinned) = config.overrides.dependency_count.get(&target.key()) {
        return pinned;
    }

    let mapping = &config.dependency_count_mapping;
    match node {
        Some(node) => {
            first_match(&mapping.ranges, &f64::from(node.fan_in)).unwrap_or(mapping.default_score)
        }
        None => mapping.default_score,
    }
}
