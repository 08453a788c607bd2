use super::combiner::{floor_to_digits, Combined};
use crate::config::{CoverageBoostConfig, RoundConfig};

/// Score increment for a file below the coverage threshold
pub fn coverage_boost_delta(coverage_pct: f64, boost: &CoverageBoostConfig) -> f64 {
    if !coverage_pct.is_finite() || boost.threshold <= 0.0 || coverage_pct >= boost.threshold {
        return 0.0;
    }
    let gap = (boost.threshold - coverage_pct) / boost.threshold;
    (gap * boost.scale).min(boost.max_boost).max(0.0)
}

/// Nudge under-covered targets upward and reclassify with the thresholds
/// the combiner used. Missing coverage is never boosted.
pub fn apply_coverage_boost(
    combined: Combined,
    coverage_pct: Option<f64>,
    boost: &CoverageBoostConfig,
    round: &RoundConfig,
) -> Combined {
    if !boost.enable {
        return combined;
    }
    let Some(pct) = coverage_pct else {
        return combined;
    };

    let delta = coverage_boost_delta(pct, boost);
    if delta <= 0.0 {
        return combined;
    }

    let score = floor_to_digits(combined.score + delta, round.digits);
    log::debug!(
        "Coverage boost {:.3} at {:.1}% coverage: {} -> {}",
        delta,
        pct,
        combined.score,
        score
    );
    Combined {
        score,
        priority: combined.thresholds.classify(score),
        ..combined
    }
}
