//! Scoring engine: resolves the layer, runs every signal mapper, applies the
//! AI overlay, combines and boosts.
//!
//! The engine holds only read-only state (configuration, dependency graph,
//! compiled patterns), so one instance scores any number of targets in
//! parallel.

use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::config::{validate_config_result, ScoringConfig};
use crate::core::{
    normalize_path, ComplexityMetrics, ConfigError, GitSignal, ScoredTarget, ScoringError,
    SignalScores, Target,
};
use crate::graph::DependencyGraph;
use crate::layer::LayerResolver;
use crate::priority::{apply_coverage_boost, combine, SuggestionOverlay};
use crate::signals::{
    business_criticality, complexity, coverage_score, dependency_count, error_risk, likelihood,
    roi, testability, CoverageSummary,
};

/// Per-run evidence from the external collectors
#[derive(Debug, Clone, Default)]
pub struct ScoringInputs {
    /// Keyed by `path#name`
    pub metrics: BTreeMap<String, ComplexityMetrics>,
    /// Keyed by file path
    pub git: BTreeMap<String, GitSignal>,
    pub coverage: CoverageSummary,
}

impl ScoringInputs {
    pub fn metrics_for(&self, target: &Target) -> Option<&ComplexityMetrics> {
        let key = target.key();
        self.metrics.get(&key).or_else(|| {
            let normalized = crate::core::target_key(&normalize_path(&target.path), &target.name);
            self.metrics.get(&normalized)
        })
    }

    /// Missing history degrades to an all-zero signal
    pub fn git_for(&self, path: &str) -> GitSignal {
        self.git
            .get(path)
            .or_else(|| self.git.get(&normalize_path(path)))
            .copied()
            .unwrap_or_default()
    }
}

/// Scored targets and the per-target failures of one batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub scored: Vec<ScoredTarget>,
    pub failures: Vec<ScoringError>,
}

pub struct ScoringEngine {
    config: ScoringConfig,
    graph: DependencyGraph,
    layers: LayerResolver,
    overlay: Option<SuggestionOverlay>,
}

impl ScoringEngine {
    /// Validate the configuration and compile every glob pattern. Fails
    /// before any target is processed.
    pub fn new(config: ScoringConfig, graph: DependencyGraph) -> Result<Self, ConfigError> {
        validate_config_result(&config)?;
        let layers = LayerResolver::new(&config)?;
        let overlay = SuggestionOverlay::from_config(&config.ai_enhancement)?;
        log::debug!(
            "Scoring engine ready: {:?} mode, {} graph nodes",
            config.scoring_mode,
            graph.len()
        );
        Ok(Self {
            config,
            graph,
            layers,
            overlay,
        })
    }

    /// The seven integer signals before combination, overlay included
    pub fn signals(
        &self,
        target: &Target,
        inputs: &ScoringInputs,
    ) -> Result<SignalScores, ScoringError> {
        let config = &self.config;
        let git = inputs.git_for(&target.path);
        let node = self.graph.node(&target.path);
        let likelihood = likelihood(&git, node, config);

        let signals = SignalScores {
            bc: business_criticality(target, config),
            cc: complexity(target, inputs.metrics_for(target), &git, likelihood, config)?,
            er: error_risk(target, likelihood, config),
            testability: testability(target, config),
            roi: roi(target, config),
            dependency_count: dependency_count(target, node, config),
            coverage_score: coverage_score(inputs.coverage.line_pct(&target.path), config),
        };

        Ok(match &self.overlay {
            Some(overlay) => overlay.apply(&target.path, &target.key(), signals, &config.overrides),
            None => signals,
        })
    }

    pub fn score_target(
        &self,
        target: &Target,
        inputs: &ScoringInputs,
    ) -> Result<ScoredTarget, ScoringError> {
        let layer = self.layers.resolve(target);
        let signals = self.signals(target, inputs)?;
        let coverage_pct = inputs
            .coverage
            .line_pct(&target.path)
            .filter(|pct| pct.is_finite());

        let combined = combine(&signals, &layer, &self.config);
        let combined = apply_coverage_boost(
            combined,
            coverage_pct,
            &self.config.coverage_boost,
            &self.config.round,
        );

        log::debug!(
            "{}: layer={} BC={} CC={} ER={} T={} ROI={} dep={} cov={} -> {} {}",
            target.key(),
            layer,
            signals.bc,
            signals.cc,
            signals.er,
            signals.testability,
            signals.roi,
            signals.dependency_count,
            signals.coverage_score,
            combined.score,
            combined.priority
        );

        Ok(ScoredTarget {
            target: Target {
                layer,
                ..target.clone()
            },
            bc: signals.bc,
            cc: signals.cc,
            er: signals.er,
            testability: signals.testability,
            roi: signals.roi,
            dependency_count: signals.dependency_count,
            coverage_pct,
            coverage_score: signals.coverage_score,
            score: combined.score,
            priority: combined.priority,
            layer_name: combined.layer_name,
        })
    }

    /// Score every target in parallel; results keep the input order
    pub fn score_all(
        &self,
        targets: &[Target],
        inputs: &ScoringInputs,
    ) -> Vec<Result<ScoredTarget, ScoringError>> {
        targets
            .par_iter()
            .map(|target| self.score_target(target, inputs))
            .collect()
    }

    /// Score every target, separating failures from successes
    pub fn score_batch(&self, targets: &[Target], inputs: &ScoringInputs) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for result in self.score_all(targets, inputs) {
            match result {
                Ok(scored) => outcome.scored.push(scored),
                Err(err) => {
                    log::warn!("Skipping target: {}", err);
                    outcome.failures.push(err);
                }
            }
        }
        log::info!(
            "Scored {} targets ({} skipped)",
            outcome.scored.len(),
            outcome.failures.len()
        );
        outcome
    }
}
