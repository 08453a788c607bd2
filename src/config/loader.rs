use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::ScoringConfig;
use super::validation::validate_config_result;
use crate::core::ConfigError;

/// File names probed, in order, in each directory during discovery
pub const CONFIG_FILE_NAMES: [&str; 3] = [".testrank.json", ".testrank.jsonc", ".testrank.toml"];

/// Document syntax of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON with `//` and `/* */` comments allowed
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Remove `//` line comments and `/* */` block comments, leaving string
/// literals untouched. Newlines inside comments are kept so parser error
/// positions still point at the right line.
pub fn strip_json_comments(contents: &str) -> String {
    let mut out = String::with_capacity(contents.len());
    let mut chars = contents.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Pure function: parse a document without validating it
pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<ScoringConfig, ConfigError> {
    match format {
        ConfigFormat::Json => serde_json::from_str(&strip_json_comments(contents))
            .map_err(|e| ConfigError::parse(e.to_string())),
        ConfigFormat::Toml => {
            toml::from_str(contents).map_err(|e| ConfigError::parse(e.to_string()))
        }
    }
}

/// Pure function: parse and validate a document
pub fn parse_and_validate_config(
    contents: &str,
    format: ConfigFormat,
) -> Result<ScoringConfig, ConfigError> {
    let config = parse_config(contents, format)?;
    validate_config_result(&config)?;
    Ok(config)
}

pub(crate) fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    let read = || -> std::io::Result<String> {
        let file = fs::File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Ok(contents)
    };
    read().map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load, parse and validate the configuration at `path`
pub fn load_config_from_path(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let contents = read_config_file(path)?;
    let config = parse_and_validate_config(&contents, ConfigFormat::from_path(path))
        .map_err(|e| e.with_path(path))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// First configuration file found walking up from `start`
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Load the explicit config, or the discovered one, or defaults.
///
/// A config file that exists but is malformed is an error: scoring with a
/// silently defaulted configuration would mis-prioritize the whole run.
pub fn load_config(explicit: Option<&Path>) -> Result<ScoringConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(ScoringConfig::default());
        }
    };

    match discover_config(&current) {
        Some(path) => load_config_from_path(&path),
        None => {
            log::debug!("No config found. Using default config.");
            Ok(ScoringConfig::default())
        }
    }
}
