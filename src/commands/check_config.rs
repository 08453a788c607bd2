use crate::config::{
    discover_config, parse_config, read_config_file, validate_config, ConfigFormat,
};
use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

/// Outcome of checking one configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigReport {
    /// `None` when no file was found and defaults were checked
    pub path: Option<PathBuf>,
    pub problems: Vec<String>,
}

impl ConfigReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Parse and validate without failing on the first problem
pub fn check_config_file(path: &Path) -> Result<ConfigReport> {
    let contents = read_config_file(path)?;
    let problems = match parse_config(&contents, ConfigFormat::from_path(path)) {
        Ok(config) => validate_config(&config),
        Err(e) => vec![e.with_path(path).to_string()],
    };
    Ok(ConfigReport {
        path: Some(path.to_path_buf()),
        problems,
    })
}

pub fn check_config(explicit: Option<&Path>) -> Result<()> {
    let discovered = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let current = std::env::current_dir().context("Failed to get current directory")?;
            discover_config(&current)
        }
    };

    let report = match &discovered {
        Some(path) => check_config_file(path)?,
        None => ConfigReport {
            path: None,
            problems: validate_config(&Default::default()),
        },
    };

    let source = report
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    if report.is_valid() {
        println!("{} {} is valid", "✓".green(), source);
        return Ok(());
    }

    println!(
        "{} {} has {} problem(s):",
        "✗".red(),
        source,
        report.problems.len()
    );
    for problem in &report.problems {
        println!("  - {}", problem);
    }
    anyhow::bail!("Invalid configuration: {}", source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_reports_every_problem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".testrank.json");
        std::fs::write(
            &path,
            indoc! {r#"
                {
                  // both of these are wrong
                  "scoringMode": "layered",
                  "thresholds": {"P0": 1, "P1": 5, "P2": 9}
                }
            "#},
        )
        .unwrap();

        let report = check_config_file(&path).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.problems.len(), 2, "{:?}", report.problems);
        assert!(check_config(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_unparsable_document_is_a_problem_not_a_crash() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".testrank.toml");
        std::fs::write(&path, "scoringMode = [").unwrap();
        let report = check_config_file(&path).unwrap();
        assert_eq!(report.problems.len(), 1);
        assert!(report.problems[0].starts_with("Failed to parse configuration"));
    }

    #[test]
    fn test_valid_file_passes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".testrank.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(check_config(Some(path.as_path())).is_ok());
    }
}
