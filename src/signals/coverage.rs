//! Coverage score mapper and the per-file coverage summary it reads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::{first_match, ScoringConfig};
use crate::core::normalize_path;

/// Coverage percentage → score; unknown coverage scores `naScore`
pub fn coverage_score(pct: Option<f64>, config: &ScoringConfig) -> u8 {
    let scoring = &config.coverage_scoring;
    match pct.filter(|pct| pct.is_finite()) {
        Some(pct) => first_match(&scoring.mapping, &pct).unwrap_or(scoring.else_score),
        None => scoring.na_score,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineCoverage {
    /// `None` when the collector reported a non-numeric value ("Unknown")
    #[serde(default, deserialize_with = "lenient_pct")]
    pub pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileCoverage {
    #[serde(default)]
    pub lines: LineCoverage,
}

fn lenient_pct<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

/// Istanbul-style `coverage-summary.json`: file path → line coverage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageSummary {
    files: BTreeMap<String, FileCoverage>,
}

impl CoverageSummary {
    const TOTAL_KEY: &'static str = "total";

    pub fn new(files: BTreeMap<String, FileCoverage>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> impl Iterator<Item = (&String, &FileCoverage)> {
        self.files
            .iter()
            .filter(|(path, _)| path.as_str() != Self::TOTAL_KEY)
    }

    /// Line coverage for `path`: exact key, then normalized key, then the
    /// first key where one path is a suffix of the other.
    pub fn line_pct(&self, path: &str) -> Option<f64> {
        if path == Self::TOTAL_KEY {
            return None;
        }
        if let Some(file) = self.files.get(path) {
            return file.lines.pct;
        }

        let wanted = normalize_path(path);
        self.entries()
            .map(|(key, file)| (normalize_path(key), file))
            .find(|(key, _)| *key == wanted)
            .or_else(|| {
                self.entries()
                    .map(|(key, file)| (normalize_path(key), file))
                    .find(|(key, _)| is_path_suffix(key, &wanted) || is_path_suffix(&wanted, key))
            })
            .and_then(|(_, file)| file.lines.pct)
    }
}

// Pure function: `suffix` matches whole trailing segments of `path`
fn is_path_suffix(path: &str, suffix: &str) -> bool {
    if suffix.is_empty() || !path.ends_with(suffix) {
        return false;
    }
    let boundary = path.len() - suffix.len();
    boundary == 0 || path[..boundary].ends_with('/')
}
