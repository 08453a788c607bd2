//! Error risk (ER): change likelihood crossed with business impact.

use crate::config::{first_match, DepGraphConfig, LikelihoodRules, ScoringConfig, DEFAULT_ER};
use crate::core::{DependencyGraphNode, GitSignal, Target};

use super::business::business_impact;

pub const LIKELIHOOD_MIN: u8 = 1;
pub const ER_MIN: u8 = 1;
pub const ER_MAX: u8 = 10;

// Pure function: base likelihood before any boost
fn base_likelihood(git: &GitSignal, rules: &LikelihoodRules) -> u8 {
    if git.commits_30d > 0 {
        if let Some(score) = first_match(&rules.commits_30d, &f64::from(git.commits_30d)) {
            return score;
        }
    }

    if let Some(rule) = &rules.fallback_90d {
        if rule.op.apply(f64::from(git.commits_90d), rule.value) {
            return rule.score;
        }
    }

    if let Some(dormant) = rules.dormant {
        if git.commits_90d == 0 && git.commits_180d == 0 {
            return dormant;
        }
    }

    rules.fallback
}

// Pure function: graph-driven boost condition
fn graph_is_busy(node: Option<&DependencyGraphNode>, dep_graph: &DepGraphConfig) -> bool {
    if !dep_graph.enable {
        return false;
    }
    node.is_some_and(|node| {
        node.cross_module_score > dep_graph.cross_module_threshold
            || node.fan_out + node.fan_in > dep_graph.fan_threshold
    })
}

/// Likelihood of a defect being introduced, in `[1, boost.cap]`.
///
/// Computed once per target: CC's platform adjustment reads the same value.
pub fn likelihood(
    git: &GitSignal,
    node: Option<&DependencyGraphNode>,
    config: &ScoringConfig,
) -> u8 {
    let rules = &config.likelihood_rules;
    let base = base_likelihood(git, rules);

    let boosted = graph_is_busy(node, &config.dep_graph)
        || git.authors_30d > rules.boost.authors_30d_threshold
        || git.in_category
        || git.multi_platform;

    let value = if boosted {
        base.saturating_add(rules.boost.delta)
    } else {
        base
    };
    value.clamp(LIKELIHOOD_MIN, rules.boost.cap.max(LIKELIHOOD_MIN))
}

/// Error risk in `[1, 10]` for an already computed likelihood.
pub fn error_risk(target: &Target, likelihood: u8, config: &ScoringConfig) -> u8 {
    if let Some(&pinned) = config.overrides.er.get(&target.key()) {
        return pinned;
    }

    let impact = business_impact(target, config);
    config
        .er_matrix
        .get(likelihood, impact)
        .unwrap_or(DEFAULT_ER)
        .clamp(ER_MIN, ER_MAX)
}
