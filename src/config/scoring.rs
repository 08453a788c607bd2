//! Score combination configuration
//!
//! This module contains the weight vectors and priority thresholds used to
//! fold signals into a score:
//! - Legacy (flat) weights
//! - Per-layer weights, thresholds and path patterns
//! - Rounding and the optional coverage boost pass

use crate::core::{Priority, SignalScores};
use serde::{Deserialize, Serialize};

/// Which weighting regime the combiner uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Legacy,
    Layered,
}

/// Flat weights applied to every target in legacy mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyWeights {
    /// Weight for business criticality (default: 0.4)
    #[serde(rename = "BC", alias = "bc", default = "default_bc_weight")]
    pub bc: f64,

    /// Weight for complexity (default: 0.3)
    #[serde(rename = "CC", alias = "cc", default = "default_cc_weight")]
    pub cc: f64,

    /// Weight for error risk (default: 0.2)
    #[serde(rename = "ER", alias = "er", default = "default_er_weight")]
    pub er: f64,

    /// Weight for testability/ROI (default: 0.1)
    #[serde(rename = "ROI", alias = "roi", default = "default_roi_weight")]
    pub roi: f64,

    /// Weight for the coverage score (default: 0, coverage off)
    #[serde(alias = "coverageScore", default)]
    pub coverage: f64,
}

impl Default for LegacyWeights {
    fn default() -> Self {
        Self {
            bc: default_bc_weight(),
            cc: default_cc_weight(),
            er: default_er_weight(),
            roi: default_roi_weight(),
            coverage: 0.0,
        }
    }
}

impl LegacyWeights {
    pub fn weighted_sum(&self, signals: &SignalScores) -> f64 {
        f64::from(signals.bc) * self.bc
            + f64::from(signals.cc) * self.cc
            + f64::from(signals.er) * self.er
            + f64::from(signals.roi) * self.roi
            + f64::from(signals.coverage_score) * self.coverage
    }

    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("BC", self.bc),
            ("CC", self.cc),
            ("ER", self.er),
            ("ROI", self.roi),
            ("coverage", self.coverage),
        ]
    }
}

fn default_bc_weight() -> f64 {
    0.4
}
fn default_cc_weight() -> f64 {
    0.3
}
fn default_er_weight() -> f64 {
    0.2
}
fn default_roi_weight() -> f64 {
    0.1
}

/// Per-layer weights. Absent weights are not summed, so a layer may omit a
/// signal entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerWeights {
    #[serde(rename = "BC", alias = "bc", default, skip_serializing_if = "Option::is_none")]
    pub bc: Option<f64>,
    #[serde(rename = "CC", alias = "cc", default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<f64>,
    #[serde(rename = "ER", alias = "er", default, skip_serializing_if = "Option::is_none")]
    pub er: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_count: Option<f64>,
    #[serde(alias = "coverageScore", default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
}

impl LayerWeights {
    pub fn weighted_sum(&self, signals: &SignalScores) -> f64 {
        [
            (self.bc, signals.bc),
            (self.cc, signals.cc),
            (self.er, signals.er),
            (self.testability, signals.testability),
            (self.dependency_count, signals.dependency_count),
            (self.coverage, signals.coverage_score),
        ]
        .iter()
        .filter_map(|(weight, signal)| weight.map(|w| w * f64::from(*signal)))
        .sum()
    }

    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        [
            ("BC", self.bc),
            ("CC", self.cc),
            ("ER", self.er),
            ("testability", self.testability),
            ("dependencyCount", self.dependency_count),
            ("coverage", self.coverage),
        ]
        .into_iter()
        .filter_map(|(name, weight)| weight.map(|w| (name, w)))
        .collect()
    }
}

/// Priority cut points. A score equal to a cut point lands in the higher bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(rename = "P0", alias = "p0", default = "default_p0")]
    pub p0: f64,
    #[serde(rename = "P1", alias = "p1", default = "default_p1")]
    pub p1: f64,
    #[serde(rename = "P2", alias = "p2", default = "default_p2")]
    pub p2: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            p0: default_p0(),
            p1: default_p1(),
            p2: default_p2(),
        }
    }
}

fn default_p0() -> f64 {
    8.5
}
fn default_p1() -> f64 {
    6.5
}
fn default_p2() -> f64 {
    4.5
}

impl Thresholds {
    /// Thresholds used by a layer that declares none
    pub fn layer_default() -> Self {
        Self {
            p0: 8.0,
            p1: 6.5,
            p2: 4.5,
        }
    }

    pub fn classify(&self, score: f64) -> Priority {
        if score >= self.p0 {
            Priority::P0
        } else if score >= self.p1 {
            Priority::P1
        } else if score >= self.p2 {
            Priority::P2
        } else {
            Priority::P3
        }
    }

    pub fn is_descending(&self) -> bool {
        self.p0 >= self.p1 && self.p1 >= self.p2
    }
}

/// Per-layer cut points. Any omitted cut point falls back to
/// [`Thresholds::layer_default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerThresholds {
    #[serde(rename = "P0", alias = "p0", default, skip_serializing_if = "Option::is_none")]
    pub p0: Option<f64>,
    #[serde(rename = "P1", alias = "p1", default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<f64>,
    #[serde(rename = "P2", alias = "p2", default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<f64>,
}

impl LayerThresholds {
    pub fn resolve(&self) -> Thresholds {
        let base = Thresholds::layer_default();
        Thresholds {
            p0: self.p0.unwrap_or(base.p0),
            p1: self.p1.unwrap_or(base.p1),
            p2: self.p2.unwrap_or(base.p2),
        }
    }
}

impl From<Thresholds> for LayerThresholds {
    fn from(thresholds: Thresholds) -> Self {
        Self {
            p0: Some(thresholds.p0),
            p1: Some(thresholds.p1),
            p2: Some(thresholds.p2),
        }
    }
}

/// Weights, thresholds and path patterns of one architectural layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    /// Display name reported as `layerName`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub weights: LayerWeights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<LayerThresholds>,
    /// Glob patterns used as the last layer-resolution fallback
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl LayerConfig {
    pub fn effective_thresholds(&self) -> Thresholds {
        self.thresholds
            .map_or_else(Thresholds::layer_default, |t| t.resolve())
    }
}

/// Rounding applied to every score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    #[serde(default = "default_round_digits")]
    pub digits: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            digits: default_round_digits(),
        }
    }
}

fn default_round_digits() -> u32 {
    2
}

/// Secondary upward nudge for under-covered files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageBoostConfig {
    #[serde(default)]
    pub enable: bool,

    /// Coverage percentage below which the boost applies (default: 60)
    #[serde(default = "default_boost_threshold")]
    pub threshold: f64,

    /// Upper bound on the added score (default: 0.5)
    #[serde(default = "default_max_boost")]
    pub max_boost: f64,

    /// Multiplier on the relative coverage gap (default: 0.5)
    #[serde(default = "default_boost_scale")]
    pub scale: f64,
}

impl Default for CoverageBoostConfig {
    fn default() -> Self {
        Self {
            enable: false,
            threshold: default_boost_threshold(),
            max_boost: default_max_boost(),
            scale: default_boost_scale(),
        }
    }
}

fn default_boost_threshold() -> f64 {
    60.0
}
fn default_max_boost() -> f64 {
    0.5
}
fn default_boost_scale() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals() -> SignalScores {
        SignalScores {
            bc: 8,
            cc: 6,
            er: 6,
            testability: 7,
            roi: 5,
            dependency_count: 4,
            coverage_score: 10,
        }
    }

    #[test]
    fn test_legacy_weighted_sum_uses_roi() {
        let sum = LegacyWeights::default().weighted_sum(&signals());
        assert!((sum - 6.7).abs() < 1e-9);
    }

    #[test]
    fn test_layer_weights_skip_absent_signals() {
        let weights = LayerWeights {
            bc: Some(0.5),
            testability: Some(0.5),
            ..Default::default()
        };
        let sum = weights.weighted_sum(&signals());
        assert!((sum - 7.5).abs() < 1e-9);
        assert_eq!(weights.entries().len(), 2);
    }

    #[test]
    fn test_thresholds_equal_score_goes_to_higher_bucket() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify(8.5), Priority::P0);
        assert_eq!(thresholds.classify(8.49), Priority::P1);
        assert_eq!(thresholds.classify(6.5), Priority::P1);
        assert_eq!(thresholds.classify(4.5), Priority::P2);
        assert_eq!(thresholds.classify(4.49), Priority::P3);
    }

    #[test]
    fn test_layer_without_thresholds_uses_layer_defaults() {
        let layer = LayerConfig::default();
        assert_eq!(layer.effective_thresholds(), Thresholds::layer_default());
    }

    #[test]
    fn test_partial_thresholds_keep_defaults_for_missing_cut_points() {
        let thresholds: Thresholds = serde_json::from_str(r#"{"P0": 9.0}"#).unwrap();
        assert_eq!(
            thresholds,
            Thresholds {
                p0: 9.0,
                ..Thresholds::default()
            }
        );
    }

    #[test]
    fn test_partial_layer_thresholds_fill_from_layer_defaults() {
        let layer: LayerConfig =
            serde_json::from_str(r#"{"thresholds": {"P0": 7.0}}"#).unwrap();
        assert_eq!(
            layer.effective_thresholds(),
            Thresholds {
                p0: 7.0,
                ..Thresholds::layer_default()
            }
        );

        let layer: LayerConfig = serde_json::from_str(r#"{"thresholds": {"p2": 3.0}}"#).unwrap();
        assert_eq!(layer.effective_thresholds().p0, 8.0);
        assert_eq!(layer.effective_thresholds().p2, 3.0);
    }

    #[test]
    fn test_weights_accept_upper_and_lower_case_keys() {
        let weights: LegacyWeights =
            serde_json::from_str(r#"{"bc": 0.5, "CC": 0.5, "coverageScore": 0.1}"#).unwrap();
        assert_eq!(weights.bc, 0.5);
        assert_eq!(weights.cc, 0.5);
        assert_eq!(weights.er, 0.2);
        assert_eq!(weights.coverage, 0.1);
    }
}
