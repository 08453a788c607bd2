//! Signal mapper configuration
//!
//! Each signal mapper reads its own sub-table from here. Defaults reproduce
//! the stock scoring tables so an empty document scores sensibly.

use super::rules::{CompareOp, CounterRule, RangeRule, ThresholdRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ER used when the matrix has no cell for a likelihood/impact pair
pub const DEFAULT_ER: u8 = 6;

/// Change-frequency → likelihood rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikelihoodRules {
    /// Rules over `commits30d`, evaluated only when there was 30-day activity
    #[serde(rename = "commits30d", default = "default_commits_30d_rules")]
    pub commits_30d: Vec<CounterRule>,

    /// `commits90d <op> value` rule used when the 30-day rules do not fire
    #[serde(rename = "fallback90d", default = "default_fallback_90d")]
    pub fallback_90d: Option<ThresholdRule>,

    /// Likelihood for files untouched for 180 days
    #[serde(default = "default_dormant")]
    pub dormant: Option<u8>,

    /// Likelihood when no rule fires (default: 3)
    #[serde(default = "default_likelihood_fallback")]
    pub fallback: u8,

    #[serde(default)]
    pub boost: LikelihoodBoost,
}

impl Default for LikelihoodRules {
    fn default() -> Self {
        Self {
            commits_30d: default_commits_30d_rules(),
            fallback_90d: default_fallback_90d(),
            dormant: default_dormant(),
            fallback: default_likelihood_fallback(),
            boost: LikelihoodBoost::default(),
        }
    }
}

fn default_commits_30d_rules() -> Vec<CounterRule> {
    vec![
        CounterRule::Threshold(ThresholdRule {
            op: CompareOp::Gte,
            value: 10.0,
            score: 5,
        }),
        CounterRule::Between {
            min: 5.0,
            max: 9.0,
            score: 4,
        },
        CounterRule::Between {
            min: 1.0,
            max: 4.0,
            score: 3,
        },
    ]
}

fn default_fallback_90d() -> Option<ThresholdRule> {
    Some(ThresholdRule {
        op: CompareOp::Gt,
        value: 2.0,
        score: 2,
    })
}

fn default_dormant() -> Option<u8> {
    Some(1)
}

fn default_likelihood_fallback() -> u8 {
    3
}

/// Conditions that raise likelihood by `delta`, clamped to `cap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikelihoodBoost {
    /// Boost when more than this many authors touched the file in 30 days
    #[serde(rename = "authors30dThreshold", default = "default_authors_threshold")]
    pub authors_30d_threshold: u32,

    #[serde(default = "default_boost_delta")]
    pub delta: u8,

    #[serde(default = "default_likelihood_cap")]
    pub cap: u8,
}

impl Default for LikelihoodBoost {
    fn default() -> Self {
        Self {
            authors_30d_threshold: default_authors_threshold(),
            delta: default_boost_delta(),
            cap: default_likelihood_cap(),
        }
    }
}

fn default_authors_threshold() -> u32 {
    3
}
fn default_boost_delta() -> u8 {
    1
}
fn default_likelihood_cap() -> u8 {
    5
}

/// likelihood × impact → ER lookup table
///
/// Serialized with string keys: `{"3": {"4": 7}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, BTreeMap<String, u8>>",
    into = "BTreeMap<String, BTreeMap<String, u8>>"
)]
pub struct ErMatrix(BTreeMap<u8, BTreeMap<u8, u8>>);

impl ErMatrix {
    pub fn get(&self, likelihood: u8, impact: u8) -> Option<u8> {
        self.0
            .get(&likelihood)
            .and_then(|row| row.get(&impact))
            .copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.0.iter().flat_map(|(likelihood, row)| {
            row.iter()
                .map(move |(impact, er)| (*likelihood, *impact, *er))
        })
    }
}

impl Default for ErMatrix {
    fn default() -> Self {
        const ROWS: [[u8; 5]; 5] = [
            [1, 2, 3, 4, 5],
            [2, 3, 4, 5, 6],
            [3, 4, 6, 7, 8],
            [4, 5, 7, 8, 9],
            [5, 6, 8, 9, 10],
        ];
        let matrix: BTreeMap<u8, BTreeMap<u8, u8>> = ROWS
            .iter()
            .zip(1u8..)
            .map(|(row, likelihood)| {
                let cells: BTreeMap<u8, u8> =
                    row.iter().zip(1u8..).map(|(er, impact)| (impact, *er)).collect();
                (likelihood, cells)
            })
            .collect();
        Self(matrix)
    }
}

impl TryFrom<BTreeMap<String, BTreeMap<String, u8>>> for ErMatrix {
    type Error = String;

    fn try_from(raw: BTreeMap<String, BTreeMap<String, u8>>) -> Result<Self, Self::Error> {
        let parse = |key: &str| {
            key.trim()
                .parse::<u8>()
                .map_err(|_| format!("erMatrix key `{}` is not a number", key))
        };
        let mut matrix = BTreeMap::new();
        for (likelihood, row) in raw {
            let mut cells = BTreeMap::new();
            for (impact, er) in row {
                cells.insert(parse(&impact)?, er);
            }
            matrix.insert(parse(&likelihood)?, cells);
        }
        Ok(Self(matrix))
    }
}

impl From<ErMatrix> for BTreeMap<String, BTreeMap<String, u8>> {
    fn from(matrix: ErMatrix) -> Self {
        matrix
            .0
            .into_iter()
            .map(|(likelihood, row)| {
                let row = row
                    .into_iter()
                    .map(|(impact, er)| (impact.to_string(), er))
                    .collect();
                (likelihood.to_string(), row)
            })
            .collect()
    }
}

/// `metrics[field] <op> value ⇒ +delta`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAdjustment {
    pub field: String,
    pub op: CompareOp,
    pub value: f64,
    pub delta: i32,
}

/// Extra CC for internal functions longer than `threshold` lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocBonus {
    #[serde(default = "default_loc_threshold")]
    pub threshold: u32,
    #[serde(default = "default_loc_bonus")]
    pub bonus: u8,
}

impl Default for LocBonus {
    fn default() -> Self {
        Self {
            threshold: default_loc_threshold(),
            bonus: default_loc_bonus(),
        }
    }
}

fn default_loc_threshold() -> u32 {
    50
}
fn default_loc_bonus() -> u8 {
    1
}

/// CC nudge for multi-platform files whose likelihood is still low
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAdjust {
    #[serde(default = "default_platform_delta")]
    pub delta: u8,

    /// Applies only while likelihood is strictly below this gate
    #[serde(default = "default_likelihood_gate")]
    pub likelihood_below: u8,
}

impl Default for PlatformAdjust {
    fn default() -> Self {
        Self {
            delta: default_platform_delta(),
            likelihood_below: default_likelihood_gate(),
        }
    }
}

fn default_platform_delta() -> u8 {
    1
}
fn default_likelihood_gate() -> u8 {
    4
}

/// Fallback CC mapping used when no cognitive complexity is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CcMapping {
    /// Cyclomatic → base CC, first hit wins
    #[serde(default = "default_cc_ranges")]
    pub ranges: Vec<RangeRule>,

    #[serde(default = "default_cc_base")]
    pub default_base: u8,

    #[serde(default)]
    pub adjustments: Vec<MetricAdjustment>,

    /// Cap on the summed adjustment deltas (default: +3)
    #[serde(default = "default_max_adjustment")]
    pub max_adjustment: i32,

    #[serde(default = "default_cc_min")]
    pub min: u8,

    #[serde(default = "default_cc_cap")]
    pub cap: u8,

    #[serde(default)]
    pub loc_bonus: LocBonus,

    #[serde(default = "default_platform_adjust")]
    pub platform_adjust: Option<PlatformAdjust>,
}

impl Default for CcMapping {
    fn default() -> Self {
        Self {
            ranges: default_cc_ranges(),
            default_base: default_cc_base(),
            adjustments: Vec::new(),
            max_adjustment: default_max_adjustment(),
            min: default_cc_min(),
            cap: default_cc_cap(),
            loc_bonus: LocBonus::default(),
            platform_adjust: default_platform_adjust(),
        }
    }
}

fn default_cc_ranges() -> Vec<RangeRule> {
    vec![
        RangeRule::new(2).lte(1.0),
        RangeRule::new(3).gte(2.0).lte(4.0),
        RangeRule::new(4).gte(5.0).lte(9.0),
        RangeRule::new(6).gte(10.0).lte(15.0),
        RangeRule::new(8).gte(16.0).lte(25.0),
        RangeRule::new(10).gt(25.0),
    ]
}

fn default_cc_base() -> u8 {
    3
}
fn default_max_adjustment() -> i32 {
    3
}
fn default_cc_min() -> u8 {
    2
}
fn default_cc_cap() -> u8 {
    10
}
fn default_platform_adjust() -> Option<PlatformAdjust> {
    Some(PlatformAdjust::default())
}

/// Cyclomatic/cognitive fusion used when cognitive complexity is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcFusion {
    #[serde(rename = "wC", default = "default_w_cyclomatic")]
    pub w_cyclomatic: f64,
    #[serde(rename = "wK", default = "default_w_cognitive")]
    pub w_cognitive: f64,
    #[serde(default = "default_cc_cap")]
    pub cap: u8,
}

impl Default for CcFusion {
    fn default() -> Self {
        Self {
            w_cyclomatic: default_w_cyclomatic(),
            w_cognitive: default_w_cognitive(),
            cap: default_cc_cap(),
        }
    }
}

fn default_w_cyclomatic() -> f64 {
    0.7
}
fn default_w_cognitive() -> f64 {
    0.3
}

/// Fixed scores for the testability/ROI heuristic branches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestabilityRules {
    #[serde(default = "default_pure_score")]
    pub pure: u8,
    #[serde(default = "default_injectable_score")]
    pub injectable: u8,
    #[serde(default = "default_platform_strong_score")]
    pub multi_platform_strong: u8,
    #[serde(rename = "needsUI", default = "default_needs_ui_score")]
    pub needs_ui: u8,
    #[serde(default = "default_multi_context_score")]
    pub multi_context: u8,
}

impl Default for TestabilityRules {
    fn default() -> Self {
        Self {
            pure: default_pure_score(),
            injectable: default_injectable_score(),
            multi_platform_strong: default_platform_strong_score(),
            needs_ui: default_needs_ui_score(),
            multi_context: default_multi_context_score(),
        }
    }
}

impl TestabilityRules {
    pub fn scores(&self) -> [(&'static str, u8); 5] {
        [
            ("pure", self.pure),
            ("injectable", self.injectable),
            ("multiPlatformStrong", self.multi_platform_strong),
            ("needsUI", self.needs_ui),
            ("multiContext", self.multi_context),
        ]
    }
}

fn default_pure_score() -> u8 {
    10
}
fn default_injectable_score() -> u8 {
    9
}
fn default_platform_strong_score() -> u8 {
    5
}
fn default_needs_ui_score() -> u8 {
    3
}
fn default_multi_context_score() -> u8 {
    7
}

/// fanIn → dependency-count score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCountMapping {
    #[serde(default = "default_fan_in_ranges")]
    pub ranges: Vec<RangeRule>,

    /// Score when the file has no dependency-graph entry
    #[serde(default = "default_dependency_score")]
    pub default_score: u8,
}

impl Default for DependencyCountMapping {
    fn default() -> Self {
        Self {
            ranges: default_fan_in_ranges(),
            default_score: default_dependency_score(),
        }
    }
}

fn default_fan_in_ranges() -> Vec<RangeRule> {
    vec![
        RangeRule::new(10).gte(10.0),
        RangeRule::new(8).gte(5.0).lt(10.0),
        RangeRule::new(6).gte(3.0).lt(5.0),
        RangeRule::new(4).gte(1.0).lt(3.0),
        RangeRule::new(2).exactly(0.0),
    ]
}

fn default_dependency_score() -> u8 {
    2
}

/// Coverage percentage → coverage score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageScoring {
    /// Ascending `lte` bands, first hit wins
    #[serde(default = "default_coverage_mapping")]
    pub mapping: Vec<RangeRule>,

    /// Score above the last band (default: 1)
    #[serde(default = "default_covered_score")]
    pub else_score: u8,

    /// Score when coverage is unknown (default: 5)
    #[serde(rename = "naScore", alias = "NA", default = "default_na_score")]
    pub na_score: u8,
}

impl Default for CoverageScoring {
    fn default() -> Self {
        Self {
            mapping: default_coverage_mapping(),
            else_score: default_covered_score(),
            na_score: default_na_score(),
        }
    }
}

fn default_coverage_mapping() -> Vec<RangeRule> {
    vec![
        RangeRule::new(10).lte(0.0),
        RangeRule::new(8).lte(40.0),
        RangeRule::new(6).lte(70.0),
        RangeRule::new(3).lte(90.0),
    ]
}

fn default_covered_score() -> u8 {
    1
}
fn default_na_score() -> u8 {
    5
}

/// Dependency graph construction and the ER likelihood boost it feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepGraphConfig {
    #[serde(default = "default_true")]
    pub enable: bool,

    /// Boost likelihood when a file imports from more categories than this
    #[serde(default = "default_cross_module_threshold")]
    pub cross_module_threshold: u32,

    /// Boost likelihood when fanOut + fanIn exceeds this
    #[serde(default = "default_fan_threshold")]
    pub fan_threshold: u32,

    /// Count bare-specifier (package) imports toward fanOut and cross-module
    #[serde(default)]
    pub count_external_imports: bool,

    /// Import prefix rewrites, e.g. `"@/" → "src/"`
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for DepGraphConfig {
    fn default() -> Self {
        Self {
            enable: true,
            cross_module_threshold: default_cross_module_threshold(),
            fan_threshold: default_fan_threshold(),
            count_external_imports: false,
            aliases: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_cross_module_threshold() -> u32 {
    2
}
fn default_fan_threshold() -> u32 {
    10
}
