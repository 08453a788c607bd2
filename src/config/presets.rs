//! Configuration presets written by `testrank init`.
//!
//! - **Legacy**: one flat weight vector for every target
//! - **Layered**: a weight/threshold vector per architectural layer
//!
//! # Example
//!
//! ```rust,ignore
//! use testrank::config::presets::PresetLevel;
//!
//! let config = PresetLevel::Layered.to_config();
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::core::ScoringConfig;
use super::scoring::{LayerConfig, LayerWeights, Thresholds};

/// Preset configuration levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetLevel {
    /// Flat weights (BC 0.4, CC 0.3, ER 0.2, ROI 0.1)
    Legacy,
    /// Per-layer weights and thresholds
    Layered,
}

impl PresetLevel {
    pub fn to_config(self) -> ScoringConfig {
        match self {
            PresetLevel::Legacy => ScoringConfig::default(),
            PresetLevel::Layered => ScoringConfig::layered_preset(),
        }
    }
}

/// Stock layer table for the four well-known layers.
pub fn default_layers() -> BTreeMap<String, LayerConfig> {
    let mut layers = BTreeMap::new();

    // Pure helpers: complexity and ease of testing dominate
    layers.insert(
        "foundation".to_string(),
        LayerConfig {
            name: Some("Foundation".to_string()),
            weights: LayerWeights {
                bc: Some(0.15),
                cc: Some(0.35),
                er: Some(0.15),
                testability: Some(0.2),
                dependency_count: Some(0.15),
                coverage: None,
            },
            thresholds: Some(
                Thresholds {
                    p0: 7.5,
                    p1: 6.0,
                    p2: 4.0,
                }
                .into(),
            ),
            patterns: vec![
                "**/utils/**".to_string(),
                "**/lib/**".to_string(),
                "**/helpers/**".to_string(),
            ],
        },
    );

    layers.insert(
        "business".to_string(),
        LayerConfig {
            name: Some("Business Logic".to_string()),
            weights: LayerWeights {
                bc: Some(0.35),
                cc: Some(0.25),
                er: Some(0.25),
                testability: Some(0.1),
                dependency_count: Some(0.05),
                coverage: None,
            },
            thresholds: None,
            patterns: vec![
                "**/services/**".to_string(),
                "**/business/**".to_string(),
                "**/domain/**".to_string(),
            ],
        },
    );

    // Shared state fails loudly when its many readers see bad data
    layers.insert(
        "state".to_string(),
        LayerConfig {
            name: Some("State Management".to_string()),
            weights: LayerWeights {
                bc: Some(0.25),
                cc: Some(0.2),
                er: Some(0.3),
                testability: Some(0.1),
                dependency_count: Some(0.15),
                coverage: None,
            },
            thresholds: None,
            patterns: vec![
                "**/atoms/**".to_string(),
                "**/stores/**".to_string(),
                "**/context/**".to_string(),
            ],
        },
    );

    layers.insert(
        "ui".to_string(),
        LayerConfig {
            name: Some("UI Components".to_string()),
            weights: LayerWeights {
                bc: Some(0.3),
                cc: Some(0.25),
                er: Some(0.2),
                testability: Some(0.15),
                dependency_count: Some(0.1),
                coverage: None,
            },
            thresholds: Some(
                Thresholds {
                    p0: 8.5,
                    p1: 7.0,
                    p2: 5.0,
                }
                .into(),
            ),
            patterns: vec![
                "**/components/**".to_string(),
                "**/pages/**".to_string(),
                "**/screens/**".to_string(),
            ],
        },
    );

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringMode;

    #[test]
    fn test_layered_preset_declares_all_known_layers() {
        let config = PresetLevel::Layered.to_config();
        assert_eq!(config.scoring_mode, ScoringMode::Layered);
        for name in ["foundation", "business", "state", "ui"] {
            assert!(config.layer(name).is_some(), "missing layer {}", name);
        }
    }

    #[test]
    fn test_preset_layer_weights_sum_to_one() {
        for (name, layer) in default_layers() {
            let sum: f64 = layer.weights.entries().iter().map(|(_, w)| w).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{} weights sum to {}", name, sum);
        }
    }

    #[test]
    fn test_legacy_preset_is_default() {
        assert_eq!(PresetLevel::Legacy.to_config(), ScoringConfig::default());
    }
}
