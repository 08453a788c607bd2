use super::rules::KeywordBuckets;
use super::scoring::{
    CoverageBoostConfig, LayerConfig, LegacyWeights, RoundConfig, ScoringMode, Thresholds,
};
use super::signals::{
    CcFusion, CcMapping, CoverageScoring, DepGraphConfig, DependencyCountMapping, ErMatrix,
    LikelihoodRules, TestabilityRules,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete scoring configuration, threaded explicitly into every mapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    #[serde(default)]
    pub scoring_mode: ScoringMode,

    #[serde(default)]
    pub weights: LegacyWeights,

    #[serde(default)]
    pub thresholds: Thresholds,

    /// Per-layer weights; required in layered mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<BTreeMap<String, LayerConfig>>,

    #[serde(default = "default_bc_keywords")]
    pub bc_keywords: KeywordBuckets,

    /// Substrings marking the critical path; BC is capped elsewhere
    #[serde(default = "default_main_chain_paths")]
    pub main_chain_paths: Vec<String>,

    #[serde(rename = "bcCapForNonMainChain", default = "default_bc_cap")]
    pub bc_cap_for_non_main_chain: u8,

    #[serde(default = "default_impact_keywords")]
    pub impact_keywords: KeywordBuckets,

    /// Impact pinned per `path#name` or per file path
    #[serde(default)]
    pub impact_overrides: BTreeMap<String, u8>,

    #[serde(default)]
    pub likelihood_rules: LikelihoodRules,

    #[serde(default)]
    pub er_matrix: ErMatrix,

    #[serde(default)]
    pub cc_mapping: CcMapping,

    #[serde(default)]
    pub cc_fusion: CcFusion,

    #[serde(default)]
    pub testability_rules: TestabilityRules,

    /// Falls back to `testabilityRules` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi_rules: Option<TestabilityRules>,

    #[serde(default)]
    pub dependency_count_mapping: DependencyCountMapping,

    #[serde(default)]
    pub coverage_scoring: CoverageScoring,

    #[serde(alias = "boostRules", default)]
    pub coverage_boost: CoverageBoostConfig,

    #[serde(default)]
    pub dep_graph: DepGraphConfig,

    #[serde(default)]
    pub overrides: Overrides,

    #[serde(default)]
    pub ai_enhancement: AiEnhancement,

    #[serde(default)]
    pub round: RoundConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scoring_mode: ScoringMode::default(),
            weights: LegacyWeights::default(),
            thresholds: Thresholds::default(),
            layers: None,
            bc_keywords: default_bc_keywords(),
            main_chain_paths: default_main_chain_paths(),
            bc_cap_for_non_main_chain: default_bc_cap(),
            impact_keywords: default_impact_keywords(),
            impact_overrides: BTreeMap::new(),
            likelihood_rules: LikelihoodRules::default(),
            er_matrix: ErMatrix::default(),
            cc_mapping: CcMapping::default(),
            cc_fusion: CcFusion::default(),
            testability_rules: TestabilityRules::default(),
            roi_rules: None,
            dependency_count_mapping: DependencyCountMapping::default(),
            coverage_scoring: CoverageScoring::default(),
            coverage_boost: CoverageBoostConfig::default(),
            dep_graph: DepGraphConfig::default(),
            overrides: Overrides::default(),
            ai_enhancement: AiEnhancement::default(),
            round: RoundConfig::default(),
        }
    }
}

impl ScoringConfig {
    pub fn roi_rules(&self) -> &TestabilityRules {
        self.roi_rules.as_ref().unwrap_or(&self.testability_rules)
    }

    pub fn layer(&self, name: &str) -> Option<&LayerConfig> {
        self.layers.as_ref().and_then(|layers| layers.get(name))
    }

    /// Stock layered configuration: the default document with `scoringMode`
    /// set to layered and one entry per well-known layer.
    pub fn layered_preset() -> Self {
        Self {
            scoring_mode: ScoringMode::Layered,
            layers: Some(super::presets::default_layers()),
            ..Self::default()
        }
    }
}

fn default_bc_keywords() -> KeywordBuckets {
    KeywordBuckets::new([
        (10, vec!["payment", "checkout", "billing", "auth", "login"]),
        (8, vec!["order", "cart", "account", "security", "permission"]),
        (6, vec!["api", "service", "store", "sync"]),
        (4, vec!["format", "parse", "convert"]),
        (2, vec!["mock", "example", "demo", "story"]),
    ])
}

fn default_main_chain_paths() -> Vec<String> {
    ["payment", "checkout", "auth", "order"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_bc_cap() -> u8 {
    8
}

fn default_impact_keywords() -> KeywordBuckets {
    KeywordBuckets::new([
        (5, vec!["payment", "money", "data loss", "security", "crash"]),
        (4, vec!["checkout", "auth", "order", "user data"]),
        (2, vec!["cosmetic", "logging", "internal tool"]),
        (1, vec!["dead code", "deprecated"]),
    ])
}

/// Per-signal overrides keyed by `path#name`. An override bypasses the
/// mapper entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(rename = "BC", alias = "bc", default)]
    pub bc: BTreeMap<String, u8>,
    #[serde(rename = "CC", alias = "cc", default)]
    pub cc: BTreeMap<String, u8>,
    #[serde(rename = "ER", alias = "er", default)]
    pub er: BTreeMap<String, u8>,
    #[serde(default)]
    pub testability: BTreeMap<String, u8>,
    #[serde(rename = "ROI", alias = "roi", default)]
    pub roi: BTreeMap<String, u8>,
    #[serde(default)]
    pub dependency_count: BTreeMap<String, u8>,
}

impl Overrides {
    /// Every override table with its signal name, for validation
    pub fn tables(&self) -> [(&'static str, &BTreeMap<String, u8>); 6] {
        [
            ("BC", &self.bc),
            ("CC", &self.cc),
            ("ER", &self.er),
            ("testability", &self.testability),
            ("ROI", &self.roi),
            ("dependencyCount", &self.dependency_count),
        ]
    }
}

/// AI analysis overlay switch and the validated suggestions it applies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEnhancement {
    #[serde(default)]
    pub enabled: bool,

    /// Set once an analysis step has produced suggestions
    #[serde(default)]
    pub analyzed: bool,

    /// Suggestions below this confidence are ignored (default: 0.0)
    #[serde(default)]
    pub min_confidence: f64,

    #[serde(default)]
    pub suggestions: AiSuggestions,
}

impl AiEnhancement {
    pub fn is_active(&self) -> bool {
        self.enabled && self.analyzed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestions {
    #[serde(default)]
    pub business_critical_paths: Vec<BusinessCriticalSuggestion>,
    #[serde(default)]
    pub high_risk_modules: Vec<HighRiskSuggestion>,
    #[serde(default)]
    pub testability_adjustments: Vec<TestabilityAdjustment>,
}

impl AiSuggestions {
    /// Every suggestion pattern, in category order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.business_critical_paths
            .iter()
            .map(|s| s.pattern.as_str())
            .chain(self.high_risk_modules.iter().map(|s| s.pattern.as_str()))
            .chain(
                self.testability_adjustments
                    .iter()
                    .map(|s| s.pattern.as_str()),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCriticalSuggestion {
    pub pattern: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(rename = "suggestedBC")]
    pub suggested_bc: u8,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRiskSuggestion {
    pub pattern: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(rename = "suggestedER")]
    pub suggested_er: u8,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestabilityAdjustment {
    pub pattern: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub reason: String,
    pub adjustment: i32,
    #[serde(default)]
    pub evidence: Vec<String>,
}

fn default_confidence() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: ScoringConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_default_config_round_trips_through_json() {
        let json = serde_json::to_string(&ScoringConfig::default()).unwrap();
        let parsed: ScoringConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ScoringConfig::default());
    }

    #[test]
    fn test_roi_rules_fall_back_to_testability_rules() {
        let mut config = ScoringConfig::default();
        config.testability_rules.pure = 6;
        assert_eq!(config.roi_rules().pure, 6);

        config.roi_rules = Some(TestabilityRules {
            pure: 4,
            ..Default::default()
        });
        assert_eq!(config.roi_rules().pure, 4);
        assert_eq!(config.testability_rules.pure, 6);
    }

    #[test]
    fn test_overrides_and_suggestions_parse() {
        let config: ScoringConfig = serde_json::from_str(
            r#"{
                "overrides": {"BC": {"src/a.ts#foo": 1}, "dependencyCount": {"src/b.ts#bar": 9}},
                "aiEnhancement": {
                    "enabled": true,
                    "analyzed": true,
                    "suggestions": {
                        "businessCriticalPaths": [
                            {"pattern": "src/pay/**", "confidence": 0.9, "reason": "money", "suggestedBC": 9, "evidence": ["a"]}
                        ],
                        "testabilityAdjustments": [
                            {"pattern": "src/ui/**", "adjustment": -2}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.overrides.bc.get("src/a.ts#foo"), Some(&1));
        assert_eq!(config.overrides.dependency_count.get("src/b.ts#bar"), Some(&9));
        assert!(config.ai_enhancement.is_active());
        let suggestions = &config.ai_enhancement.suggestions;
        assert_eq!(suggestions.business_critical_paths[0].suggested_bc, 9);
        assert_eq!(suggestions.testability_adjustments[0].confidence, 1.0);
        assert_eq!(suggestions.patterns().count(), 2);
    }

    #[test]
    fn test_boost_rules_alias() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"boostRules": {"enable": true, "threshold": 50}}"#).unwrap();
        assert!(config.coverage_boost.enable);
        assert_eq!(config.coverage_boost.threshold, 50.0);
        assert_eq!(config.coverage_boost.max_boost, 0.5);
    }
}
