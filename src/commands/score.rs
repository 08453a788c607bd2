use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{load_config, ScoringConfig};
use crate::engine::ScoringEngine;
use crate::graph::{DependencyGraph, ImportMap};
use crate::io::{self, create_writer, InputPaths, OutputFormat, ScoreReport};

/// Everything `testrank score` needs, already parsed from the command line
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub targets: PathBuf,
    pub inputs: InputPaths,
    pub imports: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub ai_suggestions: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub top: Option<usize>,
}

/// Suggestions from a separate file switch the overlay on for this run
fn apply_ai_suggestions(config: &mut ScoringConfig, path: &Path) -> Result<()> {
    let suggestions = io::load_ai_suggestions(path)?;
    log::info!(
        "Loaded AI suggestions from {} ({} patterns)",
        path.display(),
        suggestions.patterns().count()
    );
    config.ai_enhancement.suggestions = suggestions;
    config.ai_enhancement.enabled = true;
    config.ai_enhancement.analyzed = true;
    Ok(())
}

fn build_graph(imports: Option<&Path>, config: &ScoringConfig) -> Result<DependencyGraph> {
    let map: ImportMap = match imports {
        Some(path) => io::load_imports(path)?,
        None => {
            log::debug!("No import map given; dependency signals use defaults");
            return Ok(DependencyGraph::new());
        }
    };
    Ok(DependencyGraph::build(&map, &config.dep_graph))
}

/// Score every target and build the sorted report
pub fn run_scoring(cfg: &ScoreConfig) -> Result<ScoreReport> {
    let mut config = load_config(cfg.config.as_deref())?;
    if let Some(path) = &cfg.ai_suggestions {
        apply_ai_suggestions(&mut config, path)?;
    }

    let graph = build_graph(cfg.imports.as_deref(), &config)?;
    let engine = ScoringEngine::new(config, graph)?;

    let targets = io::load_targets(&cfg.targets)?;
    let inputs = cfg.inputs.load()?;
    let outcome = engine.score_batch(&targets, &inputs);

    if cfg.strict {
        if let Some(first) = outcome.failures.first() {
            anyhow::bail!(
                "{} of {} targets could not be scored (first: {})",
                outcome.failures.len(),
                targets.len(),
                first
            );
        }
    }

    let mut report = ScoreReport::new(outcome.scored, outcome.failures);
    if let Some(n) = cfg.top {
        report.truncate(n);
    }
    Ok(report)
}

pub fn handle_score(cfg: ScoreConfig) -> Result<()> {
    let report = run_scoring(&cfg)?;

    let sink: Box<dyn Write> = match &cfg.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                io::ensure_dir(parent)?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut writer = create_writer(cfg.format, sink);
    writer.write_report(&report)?;
    Ok(())
}
