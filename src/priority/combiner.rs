// Pure functions folding signals into a score and a priority bucket

use crate::config::{ScoringConfig, ScoringMode, Thresholds};
use crate::core::{Layer, Priority, SignalScores};

/// Guards `floor` against binary representation error (6.7 stored as 6.69999…)
const FLOOR_EPSILON: f64 = 1e-9;

/// Result of the combiner, kept together so the boost pass can reclassify
/// with the same thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Combined {
    pub score: f64,
    pub priority: Priority,
    pub thresholds: Thresholds,
    pub layer_name: Option<String>,
}

/// Floor `value` to `digits` decimal places
pub fn floor_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits.min(12) as i32);
    ((value * factor) + FLOOR_EPSILON).floor() / factor
}

/// Weighted score and priority for one target.
///
/// In layered mode a layer without configuration falls back to the legacy
/// weights and thresholds.
pub fn combine(signals: &SignalScores, layer: &Layer, config: &ScoringConfig) -> Combined {
    let layered = match config.scoring_mode {
        ScoringMode::Layered => config.layer(layer.as_str()),
        ScoringMode::Legacy => None,
    };

    let (raw, thresholds, layer_name) = match layered {
        Some(layer_config) => (
            layer_config.weights.weighted_sum(signals),
            layer_config.effective_thresholds(),
            layer_config.name.clone(),
        ),
        None => (config.weights.weighted_sum(signals), config.thresholds, None),
    };

    let score = floor_to_digits(raw.max(0.0), config.round.digits);
    Combined {
        score,
        priority: thresholds.classify(score),
        thresholds,
        layer_name,
    }
}
