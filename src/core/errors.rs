//! Shared error types for the scoring engine

use std::path::PathBuf;
use thiserror::Error;

/// Per-target failure. Aborts scoring of that target only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Complexity is load-bearing and never defaulted
    #[error("complexity metrics missing for {key}")]
    MissingMetrics { key: String },
}

impl ScoringError {
    /// The `path#name` key of the target that failed.
    pub fn key(&self) -> &str {
        match self {
            ScoringError::MissingMetrics { key } => key,
        }
    }
}

/// Configuration failure. Aborts the whole run before any target is scored.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be parsed at all
    #[error("Failed to parse configuration{}: {message}", display_path(.path))]
    Parse {
        message: String,
        path: Option<PathBuf>,
    },

    /// The document parsed but violates one or more constraints
    #[error("Invalid configuration:\n  - {}", .0.join("\n  - "))]
    Invalid(Vec<String>),

    /// A layer or suggestion glob pattern failed to compile
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// IO errors
    #[error("Failed to read configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: None,
        }
    }

    /// Attach the document path to a parse error
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse {
                message,
                path: Some(path.into()),
            },
            other => other,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
