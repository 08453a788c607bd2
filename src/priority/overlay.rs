//! AI suggestion overlay.
//!
//! Suggestions can only raise BC and ER, and nudge testability within its
//! range. Per category the first suggestion whose pattern matches the
//! target path applies. Signals pinned by an override are left alone.

use glob::Pattern;

use crate::config::{AiEnhancement, Overrides};
use crate::core::{normalize_path, ConfigError, SignalScores};
use crate::layer::compile_patterns;

const TESTABILITY_MIN: i32 = 0;
const TESTABILITY_MAX: i32 = 10;

#[derive(Debug, Clone)]
struct Compiled<T> {
    pattern: Pattern,
    value: T,
}

/// Suggestions that passed the confidence gate, with compiled patterns
#[derive(Debug, Clone, Default)]
pub struct SuggestionOverlay {
    business_critical: Vec<Compiled<u8>>,
    high_risk: Vec<Compiled<u8>>,
    testability: Vec<Compiled<i32>>,
}

fn compile<'a, T: Copy + 'a>(
    items: impl Iterator<Item = (&'a str, f64, T)>,
    min_confidence: f64,
) -> Result<Vec<Compiled<T>>, ConfigError> {
    let kept: Vec<(String, T)> = items
        .filter(|(_, confidence, _)| *confidence >= min_confidence)
        .map(|(pattern, _, value)| (pattern.to_string(), value))
        .collect();
    let patterns: Vec<String> = kept.iter().map(|(p, _)| p.clone()).collect();
    let compiled = compile_patterns(&patterns)?;
    Ok(compiled
        .into_iter()
        .zip(kept)
        .map(|(pattern, (_, value))| Compiled { pattern, value })
        .collect())
}

fn first_value<T: Copy>(entries: &[Compiled<T>], path: &str) -> Option<T> {
    entries
        .iter()
        .find(|entry| entry.pattern.matches(path))
        .map(|entry| entry.value)
}

impl SuggestionOverlay {
    /// `None` unless the enhancement is both enabled and analyzed
    pub fn from_config(ai: &AiEnhancement) -> Result<Option<Self>, ConfigError> {
        if !ai.is_active() {
            return Ok(None);
        }
        let suggestions = &ai.suggestions;
        let min = ai.min_confidence;

        let overlay = Self {
            business_critical: compile(
                suggestions
                    .business_critical_paths
                    .iter()
                    .map(|s| (s.pattern.as_str(), s.confidence, s.suggested_bc)),
                min,
            )?,
            high_risk: compile(
                suggestions
                    .high_risk_modules
                    .iter()
                    .map(|s| (s.pattern.as_str(), s.confidence, s.suggested_er)),
                min,
            )?,
            testability: compile(
                suggestions
                    .testability_adjustments
                    .iter()
                    .map(|s| (s.pattern.as_str(), s.confidence, s.adjustment)),
                min,
            )?,
        };
        log::debug!(
            "AI overlay active: {} BC, {} ER, {} testability suggestions",
            overlay.business_critical.len(),
            overlay.high_risk.len(),
            overlay.testability.len()
        );
        Ok(Some(overlay))
    }

    /// Apply the matching suggestions to a target's signals
    pub fn apply(
        &self,
        path: &str,
        key: &str,
        signals: SignalScores,
        overrides: &Overrides,
    ) -> SignalScores {
        let path = normalize_path(path);
        let mut out = signals;

        if !overrides.bc.contains_key(key) {
            if let Some(suggested) = first_value(&self.business_critical, &path) {
                out.bc = out.bc.max(suggested);
            }
        }

        if !overrides.er.contains_key(key) {
            if let Some(suggested) = first_value(&self.high_risk, &path) {
                out.er = out.er.max(suggested);
            }
        }

        if let Some(adjustment) = first_value(&self.testability, &path) {
            let nudge = |value: u8| {
                i32::from(value)
                    .saturating_add(adjustment)
                    .clamp(TESTABILITY_MIN, TESTABILITY_MAX) as u8
            };
            if !overrides.testability.contains_key(key) {
                out.testability = nudge(out.testability);
            }
            if !overrides.roi.contains_key(key) {
                out.roi = nudge(out.roi);
            }
        }

        out
    }
}
