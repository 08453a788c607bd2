//! Ordered scoring rules and the shared "first match wins" evaluator.
//!
//! Keyword buckets (BC, impact), counter rules (likelihood) and numeric range
//! tables (CC, dependency count, coverage) are all lists of rules that either
//! yield a score for an input or pass. [`first_match`] walks any such list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rule that may map an input to a score.
pub trait ScoreRule<I: ?Sized> {
    fn evaluate(&self, input: &I) -> Option<u8>;
}

/// Evaluate rules in order and return the first score produced.
pub fn first_match<I: ?Sized, R: ScoreRule<I>>(rules: &[R], input: &I) -> Option<u8> {
    rules.iter().find_map(|rule| rule.evaluate(input))
}

/// Comparison operator for threshold rules and metric adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
}

impl CompareOp {
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Gt => lhs > rhs,
            CompareOp::Gte => lhs >= rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Lte => lhs <= rhs,
            CompareOp::Eq => (lhs - rhs).abs() < f64::EPSILON,
        }
    }
}

/// `value <op> threshold → score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub op: CompareOp,
    pub value: f64,
    pub score: u8,
}

impl ScoreRule<f64> for ThresholdRule {
    fn evaluate(&self, input: &f64) -> Option<u8> {
        self.op.apply(*input, self.value).then_some(self.score)
    }
}

/// Tagged counter rule: a threshold or an inclusive `between` band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CounterRule {
    Threshold(ThresholdRule),
    Between { min: f64, max: f64, score: u8 },
}

impl CounterRule {
    pub fn score(&self) -> u8 {
        match self {
            CounterRule::Threshold(rule) => rule.score,
            CounterRule::Between { score, .. } => *score,
        }
    }
}

impl ScoreRule<f64> for CounterRule {
    fn evaluate(&self, input: &f64) -> Option<u8> {
        match self {
            CounterRule::Threshold(rule) => rule.evaluate(input),
            CounterRule::Between { min, max, score } => {
                (*input >= *min && *input <= *max).then_some(*score)
            }
        }
    }
}

/// Range-table row. Every bound that is present must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<f64>,
    pub score: u8,
}

impl RangeRule {
    pub fn new(score: u8) -> Self {
        Self {
            score,
            ..Default::default()
        }
    }

    pub fn gte(mut self, bound: f64) -> Self {
        self.gte = Some(bound);
        self
    }

    pub fn gt(mut self, bound: f64) -> Self {
        self.gt = Some(bound);
        self
    }

    pub fn lt(mut self, bound: f64) -> Self {
        self.lt = Some(bound);
        self
    }

    pub fn lte(mut self, bound: f64) -> Self {
        self.lte = Some(bound);
        self
    }

    pub fn exactly(mut self, bound: f64) -> Self {
        self.eq = Some(bound);
        self
    }

    fn bounds(&self) -> [(Option<f64>, CompareOp); 5] {
        [
            (self.gt, CompareOp::Gt),
            (self.gte, CompareOp::Gte),
            (self.lt, CompareOp::Lt),
            (self.lte, CompareOp::Lte),
            (self.eq, CompareOp::Eq),
        ]
    }

    pub fn has_bounds(&self) -> bool {
        self.bounds().iter().any(|(bound, _)| bound.is_some())
    }

    pub fn matches(&self, value: f64) -> bool {
        self.bounds()
            .iter()
            .filter_map(|(bound, op)| bound.map(|b| (b, *op)))
            .all(|(bound, op)| op.apply(value, bound))
    }
}

impl ScoreRule<f64> for RangeRule {
    fn evaluate(&self, input: &f64) -> Option<u8> {
        self.matches(*input).then_some(self.score)
    }
}

/// Keywords that all map to the same score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordBucket {
    pub score: u8,
    pub keywords: Vec<String>,
}

impl ScoreRule<str> for KeywordBucket {
    /// `input` is expected to be lowercase already.
    fn evaluate(&self, input: &str) -> Option<u8> {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && input.contains(keyword.as_str()))
            .then_some(self.score)
    }
}

/// Score → keyword-list map, kept sorted by descending score.
///
/// Serialized as an object keyed by the score (`{"10": ["payment"]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct KeywordBuckets(Vec<KeywordBucket>);

impl KeywordBuckets {
    pub fn new(buckets: impl IntoIterator<Item = (u8, Vec<&'static str>)>) -> Self {
        let mut buckets: Vec<KeywordBucket> = buckets
            .into_iter()
            .map(|(score, keywords)| KeywordBucket {
                score,
                keywords: keywords.into_iter().map(str::to_lowercase).collect(),
            })
            .collect();
        buckets.sort_by(|a, b| b.score.cmp(&a.score));
        Self(buckets)
    }

    /// Buckets in descending score order
    pub fn buckets(&self) -> &[KeywordBucket] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Score of the highest bucket with a keyword contained in `haystack`.
    pub fn lookup(&self, haystack: &str) -> Option<u8> {
        first_match(&self.0, haystack)
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for KeywordBuckets {
    type Error = String;

    fn try_from(map: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut buckets = map
            .into_iter()
            .map(|(score, keywords)| {
                let score = score
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| format!("keyword bucket key `{}` is not a score", score))?;
                Ok(KeywordBucket {
                    score,
                    keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        buckets.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(Self(buckets))
    }
}

impl From<KeywordBuckets> for BTreeMap<String, Vec<String>> {
    fn from(buckets: KeywordBuckets) -> Self {
        buckets
            .0
            .into_iter()
            .map(|bucket| (bucket.score.to_string(), bucket.keywords))
            .collect()
    }
}
