//! Complexity (CC) mapper.
//!
//! Two paths: a weighted cyclomatic/cognitive fusion when cognitive
//! complexity is known, otherwise a range table over cyclomatic complexity
//! with optional metric adjustments. Both are followed by the LOC bonus and
//! the multi-platform nudge.

use crate::config::{first_match, CcFusion, CcMapping, ScoringConfig};
use crate::core::{ComplexityMetrics, GitSignal, ScoringError, Target};

/// Lowest CC any path can produce
pub const CC_FLOOR: u8 = 2;

// Pure function: `floor(fused / 5) + 3`
fn fused_score(cyclomatic: u32, cognitive: u32, fusion: &CcFusion) -> u8 {
    let fused =
        fusion.w_cyclomatic * f64::from(cyclomatic) + fusion.w_cognitive * f64::from(cognitive);
    let stepped = (fused / 5.0).floor() + 3.0;
    clamp_score(stepped, CC_FLOOR, fusion.cap)
}

// Pure function: range table plus capped adjustments
fn mapped_score(metrics: &ComplexityMetrics, mapping: &CcMapping) -> u8 {
    let base = first_match(&mapping.ranges, &f64::from(metrics.cyclomatic))
        .unwrap_or(mapping.default_base);

    let adjustment: i32 = mapping
        .adjustments
        .iter()
        .filter(|adj| {
            metrics
                .field(&adj.field)
                .is_some_and(|value| adj.op.apply(value, adj.value))
        })
        .fold(0i32, |acc, adj| acc.saturating_add(adj.delta));
    let adjustment = adjustment.min(mapping.max_adjustment);

    clamp_score(
        f64::from(base) + f64::from(adjustment),
        mapping.min,
        mapping.cap,
    )
}

fn clamp_score(value: f64, min: u8, max: u8) -> u8 {
    let max = max.max(min);
    value.clamp(f64::from(min), f64::from(max)) as u8
}

/// CC in `[2, cap]`.
///
/// `likelihood` must be the value the ER mapper uses for the same target.
pub fn complexity(
    target: &Target,
    metrics: Option<&ComplexityMetrics>,
    git: &GitSignal,
    likelihood: u8,
    config: &ScoringConfig,
) -> Result<u8, ScoringError> {
    let key = target.key();
    if let Some(&pinned) = config.overrides.cc.get(&key) {
        return Ok(pinned);
    }

    let metrics = metrics.ok_or(ScoringError::MissingMetrics { key })?;
    let mapping = &config.cc_mapping;

    let (mut score, cap) = match metrics.cognitive {
        Some(cognitive) => (
            fused_score(metrics.cyclomatic, cognitive, &config.cc_fusion),
            config.cc_fusion.cap,
        ),
        None => (mapped_score(metrics, mapping), mapping.cap),
    };
    let min = CC_FLOOR.max(mapping.min);

    if target.internal && target.loc > mapping.loc_bonus.threshold {
        score = clamp_score(
            f64::from(score) + f64::from(mapping.loc_bonus.bonus),
            min,
            cap,
        );
    }

    if let Some(platform) = &mapping.platform_adjust {
        if git.multi_platform && likelihood < platform.likelihood_below {
            score = clamp_score(f64::from(score) + f64::from(platform.delta), min, cap);
        }
    }

    Ok(score)
}
