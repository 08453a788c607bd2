//! Loaders for the collector outputs consumed by `testrank score`.
//!
//! Every input except the target list is optional. A missing optional file
//! degrades to empty data, which the mappers turn into neutral defaults.

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::read_json;
use crate::config::AiSuggestions;
use crate::core::{ComplexityMetrics, GitSignal, Target};
use crate::engine::ScoringInputs;
use crate::graph::ImportMap;
use crate::signals::CoverageSummary;

/// Scanner output: a bare array or `{"targets": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum TargetsDocument {
    Bare(Vec<Target>),
    Wrapped { targets: Vec<Target> },
}

/// AI analysis output: `{"suggestions": {...}}` or the suggestions object
#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionsDocument {
    Wrapped { suggestions: AiSuggestions },
    Bare(AiSuggestions),
}

pub fn load_targets(path: &Path) -> Result<Vec<Target>> {
    let targets = match read_json::<TargetsDocument>(path, "targets")? {
        TargetsDocument::Bare(targets) | TargetsDocument::Wrapped { targets } => targets,
    };
    log::debug!("Loaded {} targets from {}", targets.len(), path.display());
    Ok(targets)
}

pub fn load_metrics(path: &Path) -> Result<BTreeMap<String, ComplexityMetrics>> {
    read_json(path, "complexity metrics")
}

pub fn load_git_signals(path: &Path) -> Result<BTreeMap<String, GitSignal>> {
    read_json(path, "git signals")
}

pub fn load_coverage(path: &Path) -> Result<CoverageSummary> {
    let summary: CoverageSummary = read_json(path, "coverage summary")?;
    log::debug!("Loaded coverage for {} files", summary.len());
    Ok(summary)
}

pub fn load_imports(path: &Path) -> Result<ImportMap> {
    read_json(path, "import map")
}

pub fn load_ai_suggestions(path: &Path) -> Result<AiSuggestions> {
    Ok(match read_json::<SuggestionsDocument>(path, "AI suggestions")? {
        SuggestionsDocument::Wrapped { suggestions } | SuggestionsDocument::Bare(suggestions) => {
            suggestions
        }
    })
}

/// Paths of the optional per-run evidence files
#[derive(Debug, Clone, Default)]
pub struct InputPaths {
    pub metrics: Option<PathBuf>,
    pub git: Option<PathBuf>,
    pub coverage: Option<PathBuf>,
}

impl InputPaths {
    pub fn load(&self) -> Result<ScoringInputs> {
        let mut inputs = ScoringInputs::default();
        if let Some(path) = &self.metrics {
            inputs.metrics = load_metrics(path)?;
        } else {
            log::warn!(
                "No complexity metrics given; every target without a CC override will be skipped"
            );
        }
        if let Some(path) = &self.git {
            inputs.git = load_git_signals(path)?;
        }
        if let Some(path) = &self.coverage {
            inputs.coverage = load_coverage(path)?;
        }
        Ok(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_targets_bare_and_wrapped() {
        let dir = TempDir::new().unwrap();
        let bare = write(
            &dir,
            "bare.json",
            r#"[{"name": "a", "path": "src/a.ts", "type": "function"}]"#,
        );
        let wrapped = write(
            &dir,
            "wrapped.json",
            r#"{"targets": [{"name": "b", "path": "src/b.ts", "type": "hook", "layer": "state"}]}"#,
        );
        assert_eq!(load_targets(&bare).unwrap()[0].name, "a");
        let targets = load_targets(&wrapped).unwrap();
        assert_eq!(targets[0].layer, crate::core::Layer::State);
    }

    #[test]
    fn test_input_paths_load_all() {
        let dir = TempDir::new().unwrap();
        let metrics = write(
            &dir,
            "metrics.json",
            r#"{"src/a.ts#a": {"cyclomatic": 4, "cognitive": 6, "nestingDepth": 3}}"#,
        );
        let git = write(
            &dir,
            "git.json",
            indoc! {r#"
                {"src/a.ts": {"commits30d": 2, "authors30d": 1, "multiPlatform": true}}
            "#},
        );
        let coverage = write(
            &dir,
            "coverage.json",
            r#"{"total": {"lines": {"pct": 50}}, "src/a.ts": {"lines": {"pct": 25}}}"#,
        );
        let inputs = InputPaths {
            metrics: Some(metrics),
            git: Some(git),
            coverage: Some(coverage),
        }
        .load()
        .unwrap();

        let m = &inputs.metrics["src/a.ts#a"];
        assert_eq!(m.cognitive, Some(6));
        assert_eq!(m.field("nestingDepth"), Some(3.0));
        assert!(inputs.git_for("src/a.ts").multi_platform);
        assert_eq!(inputs.coverage.line_pct("src/a.ts"), Some(25.0));
    }

    #[test]
    fn test_suggestions_document_shapes() {
        let dir = TempDir::new().unwrap();
        let wrapped = write(
            &dir,
            "ai.json",
            r#"{"suggestions": {"highRiskModules": [{"pattern": "src/**", "suggestedER": 8}]}}"#,
        );
        let suggestions = load_ai_suggestions(&wrapped).unwrap();
        assert_eq!(suggestions.high_risk_modules[0].suggested_er, 8);
    }

    #[test]
    fn test_malformed_input_names_the_file() {
        let dir = TempDir::new().unwrap();
        let broken = write(&dir, "git.json", "{ nope");
        let err = load_git_signals(&broken).unwrap_err();
        assert!(format!("{:#}", err).contains("git signals"));
    }
}
