//! Input and output records of the scoring engine.
//!
//! Everything here is plain serializable data handed in by external
//! collaborators (scanner, complexity analyzer, git miner, coverage
//! collector) or emitted to the reporting layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Build the `path#name` key used by metrics, overrides and persisted reports.
pub fn target_key(path: &str, name: &str) -> String {
    format!("{}#{}", path, name)
}

/// Normalize a file path for map lookups: forward slashes, no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut trimmed = unified.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}

/// Kind of code unit discovered by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Function,
    Component,
    Hook,
    Atom,
}

/// Architectural layer a target belongs to.
///
/// The four well-known layers have dedicated variants; any other layer name
/// declared in the configuration is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layer {
    Foundation,
    Business,
    State,
    Ui,
    #[default]
    Unknown,
    Other(String),
}

impl Layer {
    /// Layers checked first, in this order, when falling back to path patterns.
    pub const RESOLUTION_ORDER: [Layer; 4] =
        [Layer::Foundation, Layer::Business, Layer::State, Layer::Ui];

    pub fn as_str(&self) -> &str {
        match self {
            Layer::Foundation => "foundation",
            Layer::Business => "business",
            Layer::State => "state",
            Layer::Ui => "ui",
            Layer::Unknown => "unknown",
            Layer::Other(name) => name,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Layer::Unknown)
    }
}

impl From<String> for Layer {
    fn from(value: String) -> Self {
        Layer::from(value.as_str())
    }
}

impl From<&str> for Layer {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "foundation" => Layer::Foundation,
            "business" => Layer::Business,
            "state" => Layer::State,
            "ui" => Layer::Ui,
            "" | "unknown" => Layer::Unknown,
            _ => Layer::Other(value.trim().to_string()),
        }
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.as_str().to_string()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code-feature hints attached by the scanner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies_injectable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_platform_strong: Option<bool>,
    #[serde(rename = "needsUI", default, skip_serializing_if = "Option::is_none")]
    pub needs_ui: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_hint: Option<String>,
    /// Scanner fields this engine does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A function or component produced by the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub loc: u32,
    #[serde(default)]
    pub exported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TargetMetadata>,
}

impl Target {
    pub fn key(&self) -> String {
        target_key(&self.path, &self.name)
    }

    pub fn hints(&self) -> CodeHints {
        self.metadata
            .as_ref()
            .map(CodeHints::from_metadata)
            .unwrap_or_default()
    }

    pub fn impact_hint(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.impact_hint.as_deref())
    }
}

/// Tri-state view over the boolean hints; `None` means "not analyzed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeHints {
    pub is_pure: Option<bool>,
    pub dependencies_injectable: Option<bool>,
    pub multi_platform_strong: Option<bool>,
    pub needs_ui: Option<bool>,
}

impl CodeHints {
    fn from_metadata(meta: &TargetMetadata) -> Self {
        Self {
            is_pure: meta.is_pure,
            dependencies_injectable: meta.dependencies_injectable,
            multi_platform_strong: meta.multi_platform_strong,
            needs_ui: meta.needs_ui,
        }
    }

    pub fn pure(&self) -> bool {
        self.is_pure.unwrap_or(false)
    }

    pub fn injectable(&self) -> bool {
        self.dependencies_injectable.unwrap_or(false)
    }

    pub fn platform_strong(&self) -> bool {
        self.multi_platform_strong.unwrap_or(false)
    }

    pub fn ui(&self) -> bool {
        self.needs_ui.unwrap_or(false)
    }
}

/// Complexity numbers from the static analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    pub cyclomatic: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognitive: Option<u32>,
    /// Additional metric fields (nesting depth, parameter count, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ComplexityMetrics {
    pub fn new(cyclomatic: u32, cognitive: Option<u32>) -> Self {
        Self {
            cyclomatic,
            cognitive,
            extra: BTreeMap::new(),
        }
    }

    /// Look up a metric by field name, numeric fields only.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "cyclomatic" => Some(f64::from(self.cyclomatic)),
            "cognitive" => self.cognitive.map(f64::from),
            other => self.extra.get(other).and_then(Value::as_f64),
        }
    }
}

/// Change-history signal mined from git for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitSignal {
    pub commits_30d: u32,
    pub commits_90d: u32,
    pub commits_180d: u32,
    pub authors_30d: u32,
    pub in_category: bool,
    pub multi_platform: bool,
}

/// Per-file view of the import graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraphNode {
    pub category: String,
    pub deps: Vec<String>,
    pub cross_module_score: u32,
    pub fan_out: u32,
    pub fan_in: u32,
}

/// Discrete testing priority, `P0` being the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five signals (plus the ROI alias and coverage score) for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalScores {
    pub bc: u8,
    pub cc: u8,
    pub er: u8,
    pub testability: u8,
    pub roi: u8,
    pub dependency_count: u8,
    pub coverage_score: u8,
}

/// A target with its signals, score and priority bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTarget {
    #[serde(flatten)]
    pub target: Target,
    #[serde(rename = "BC")]
    pub bc: u8,
    #[serde(rename = "CC")]
    pub cc: u8,
    #[serde(rename = "ER")]
    pub er: u8,
    pub testability: u8,
    #[serde(rename = "ROI")]
    pub roi: u8,
    pub dependency_count: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_pct: Option<f64>,
    pub coverage_score: u8,
    pub score: f64,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_name: Option<String>,
}

impl ScoredTarget {
    pub fn key(&self) -> String {
        self.target.key()
    }

    pub fn layer(&self) -> &Layer {
        &self.target.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_target_key_joins_path_and_name() {
        assert_eq!(target_key("src/a.ts", "foo"), "src/a.ts#foo");
    }

    #[test]
    fn test_normalize_path_strips_dot_prefix_and_backslashes() {
        assert_eq!(normalize_path("./src/a.ts"), "src/a.ts");
        assert_eq!(normalize_path("././src\\b.ts"), "src/b.ts");
        assert_eq!(normalize_path("src/c.ts"), "src/c.ts");
    }

    #[test]
    fn test_layer_round_trips_through_strings() {
        assert_eq!(Layer::from("UI"), Layer::Ui);
        assert_eq!(Layer::from(""), Layer::Unknown);
        assert_eq!(Layer::from("infra"), Layer::Other("infra".to_string()));
        assert_eq!(String::from(Layer::State), "state");
    }

    #[test]
    fn test_target_deserializes_scanner_record() {
        let json = r#"{
            "name": "useCart",
            "path": "src/hooks/useCart.ts",
            "type": "hook",
            "layer": "unknown",
            "internal": false,
            "loc": 42,
            "exported": true,
            "metadata": {"isPure": false, "needsUI": true, "impactHint": "checkout flow", "line": 12}
        }"#;
        let target: Target = serde_json::from_str(json).unwrap();
        assert_eq!(target.kind, TargetKind::Hook);
        assert_eq!(target.key(), "src/hooks/useCart.ts#useCart");
        let hints = target.hints();
        assert_eq!(hints.is_pure, Some(false));
        assert!(hints.ui());
        assert_eq!(target.impact_hint(), Some("checkout flow"));
        let meta = target.metadata.unwrap();
        assert_eq!(meta.extra.get("line"), Some(&serde_json::json!(12)));
    }

    #[test]
    fn test_complexity_metrics_exposes_extra_fields() {
        let metrics: ComplexityMetrics =
            serde_json::from_str(r#"{"cyclomatic": 7, "nestingDepth": 4, "note": "x"}"#).unwrap();
        assert_eq!(metrics.field("cyclomatic"), Some(7.0));
        assert_eq!(metrics.field("cognitive"), None);
        assert_eq!(metrics.field("nestingDepth"), Some(4.0));
        assert_eq!(metrics.field("note"), None);
    }

    #[test]
    fn test_git_signal_defaults_missing_fields() {
        let signal: GitSignal = serde_json::from_str(r#"{"commits30d": 4}"#).unwrap();
        assert_eq!(signal.commits_30d, 4);
        assert_eq!(signal.commits_90d, 0);
        assert!(!signal.multi_platform);
    }

    #[test]
    fn test_priority_orders_p0_first() {
        let mut priorities = vec![Priority::P3, Priority::P0, Priority::P2, Priority::P1];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::P0, Priority::P1, Priority::P2, Priority::P3]
        );
    }
}
