pub mod inputs;
pub mod output;

pub use inputs::{
    load_ai_suggestions, load_coverage, load_git_signals, load_imports, load_metrics,
    load_targets, InputPaths,
};
pub use output::{
    create_writer, JsonWriter, OutputFormat, OutputWriter, ScoreReport, TerminalWriter,
};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Read and deserialize a JSON document; `what` names it in error messages
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = read_file(path)?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {} from {}", what, path.display()))
}
