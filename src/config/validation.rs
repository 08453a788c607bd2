//! Validation with error accumulation for configuration.
//!
//! Every check runs and every failure is reported, so a user sees all
//! configuration problems in a single run. Each check returns a
//! [`ConfigValidation`] and the results are combined with
//! [`combine_validations`]. Each message is prefixed with the field path it
//! refers to (e.g. `layers.ui.thresholds`).
//!
//! # Example
//!
//! ```rust,ignore
//! use stillwater::Validation;
//! use testrank::config::{validation::validate, ScoringConfig};
//!
//! match validate(&ScoringConfig::default()) {
//!     Validation::Success(()) => println!("valid"),
//!     Validation::Failure(errors) => {
//!         for error in errors {
//!             eprintln!("{}", error);
//!         }
//!     }
//! }
//! ```

use super::core::ScoringConfig;
use super::rules::{KeywordBuckets, RangeRule};
use super::scoring::{ScoringMode, Thresholds};
use crate::core::{ConfigError, Layer};
use stillwater::{NonEmptyVec, Validation};

/// Outcome of one or more checks: success, or every message collected
pub type ConfigValidation = Validation<(), NonEmptyVec<String>>;

/// Inclusive range every signal score must fall in.
pub type SignalRange = (u8, u8);

pub const BC_RANGE: SignalRange = (1, 10);
pub const CC_RANGE: SignalRange = (2, 10);
pub const ER_RANGE: SignalRange = (1, 10);
pub const TESTABILITY_RANGE: SignalRange = (0, 10);
pub const DEPENDENCY_RANGE: SignalRange = (2, 10);
pub const COVERAGE_RANGE: SignalRange = (1, 10);
pub const LIKELIHOOD_RANGE: SignalRange = (1, 5);

/// Run every check, accumulating all failures
pub fn validate(config: &ScoringConfig) -> ConfigValidation {
    let checks: [fn(&ScoringConfig) -> ConfigValidation; 14] = [
        check_mode,
        check_layer_keys,
        check_weights,
        check_thresholds,
        check_keyword_scores,
        check_likelihood,
        check_er_matrix,
        check_complexity,
        check_testability,
        check_range_tables,
        check_overrides,
        check_suggestions,
        check_patterns,
        check_misc,
    ];
    combine_validations(checks.iter().map(|check| check(config)).collect())
}

/// All messages as a flat list (empty when valid), for reporting
pub fn validate_config(config: &ScoringConfig) -> Vec<String> {
    match validate(config) {
        Validation::Success(()) => Vec::new(),
        Validation::Failure(errors) => errors.into_iter().collect(),
    }
}

/// Fail-fast wrapper used at startup
pub fn validate_config_result(config: &ScoringConfig) -> Result<(), ConfigError> {
    match validate(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid(errors.into_iter().collect())),
    }
}

/// Merge check results, keeping every failure in order
pub fn combine_validations(validations: Vec<ConfigValidation>) -> ConfigValidation {
    let mut failures: Vec<String> = Vec::new();

    for v in validations {
        if let Validation::Failure(errors) = v {
            for err in errors {
                failures.push(err);
            }
        }
    }

    from_errors(failures)
}

// Pure function: Lift a list of messages into a validation
fn from_errors(errors: Vec<String>) -> ConfigValidation {
    let mut errors = errors.into_iter();
    match errors.next() {
        Some(first) => Validation::Failure(NonEmptyVec::new(first, errors.collect())),
        None => Validation::Success(()),
    }
}

// Pure function: Check a score lies in an inclusive range
fn check_in_range(field: &str, value: u8, (min, max): SignalRange) -> Option<String> {
    (value < min || value > max)
        .then(|| format!("{}: {} is outside [{}, {}]", field, value, min, max))
}

fn check_weight(field: &str, weight: f64) -> Option<String> {
    (!weight.is_finite() || weight < 0.0)
        .then(|| format!("{}: weight must be a non-negative number, got {}", field, weight))
}

fn check_threshold_order(field: &str, thresholds: &Thresholds) -> Option<String> {
    (!thresholds.is_descending()).then(|| {
        format!(
            "{}: thresholds must satisfy P0 >= P1 >= P2 (got {}/{}/{})",
            field, thresholds.p0, thresholds.p1, thresholds.p2
        )
    })
}

fn check_mode(config: &ScoringConfig) -> ConfigValidation {
    match (config.scoring_mode, &config.layers) {
        (ScoringMode::Layered, None) => from_errors(vec![
            "layers: layered scoring mode requires a `layers` section".to_string(),
        ]),
        (ScoringMode::Layered, Some(layers)) if layers.is_empty() => from_errors(vec![
            "layers: layered scoring mode requires at least one layer".to_string(),
        ]),
        _ => Validation::Success(()),
    }
}

// Layer lookups use the canonical lowercase name, so `UI` would never match
fn check_layer_keys(config: &ScoringConfig) -> ConfigValidation {
    from_errors(
        config
            .layers
            .iter()
            .flatten()
            .filter_map(|(key, _)| {
                let canonical = Layer::from(key.as_str());
                (canonical.as_str() != key.as_str()).then(|| {
                    format!(
                        "layers.{}: layer keys must be written as `{}`",
                        key,
                        canonical.as_str()
                    )
                })
            })
            .collect(),
    )
}

fn check_weights(config: &ScoringConfig) -> ConfigValidation {
    let legacy = config
        .weights
        .entries()
        .into_iter()
        .filter_map(|(name, w)| check_weight(&format!("weights.{}", name), w));

    let layered = config
        .layers
        .iter()
        .flatten()
        .flat_map(|(layer, cfg)| {
            cfg.weights
                .entries()
                .into_iter()
                .filter_map(move |(name, w)| {
                    check_weight(&format!("layers.{}.weights.{}", layer, name), w)
                })
        });

    let fusion = [
        ("ccFusion.wC", config.cc_fusion.w_cyclomatic),
        ("ccFusion.wK", config.cc_fusion.w_cognitive),
    ]
    .into_iter()
    .filter_map(|(field, w)| check_weight(field, w));

    from_errors(legacy.chain(layered).chain(fusion).collect())
}

fn check_thresholds(config: &ScoringConfig) -> ConfigValidation {
    let mut errors: Vec<String> = check_threshold_order("thresholds", &config.thresholds)
        .into_iter()
        .collect();
    for (name, layer) in config.layers.iter().flatten() {
        if layer.thresholds.is_some() {
            errors.extend(check_threshold_order(
                &format!("layers.{}.thresholds", name),
                &layer.effective_thresholds(),
            ));
        }
    }
    from_errors(errors)
}

fn check_buckets(field: &str, buckets: &KeywordBuckets, range: SignalRange) -> Vec<String> {
    buckets
        .buckets()
        .iter()
        .filter_map(|bucket| check_in_range(field, bucket.score, range))
        .collect()
}

fn check_keyword_scores(config: &ScoringConfig) -> ConfigValidation {
    let mut errors = check_buckets("bcKeywords", &config.bc_keywords, BC_RANGE);
    errors.extend(check_buckets(
        "impactKeywords",
        &config.impact_keywords,
        (1, 10),
    ));
    errors.extend(check_in_range(
        "bcCapForNonMainChain",
        config.bc_cap_for_non_main_chain,
        BC_RANGE,
    ));
    errors.extend(config.impact_overrides.iter().filter_map(|(key, v)| {
        check_in_range(&format!("impactOverrides.{}", key), *v, (1, 10))
    }));
    from_errors(errors)
}

fn check_likelihood(config: &ScoringConfig) -> ConfigValidation {
    let rules = &config.likelihood_rules;
    let mut errors: Vec<String> = rules
        .commits_30d
        .iter()
        .filter_map(|rule| {
            check_in_range("likelihoodRules.commits30d", rule.score(), LIKELIHOOD_RANGE)
        })
        .collect();
    if let Some(rule) = &rules.fallback_90d {
        errors.extend(check_in_range(
            "likelihoodRules.fallback90d",
            rule.score,
            LIKELIHOOD_RANGE,
        ));
    }
    if let Some(dormant) = rules.dormant {
        errors.extend(check_in_range(
            "likelihoodRules.dormant",
            dormant,
            LIKELIHOOD_RANGE,
        ));
    }
    errors.extend(check_in_range(
        "likelihoodRules.fallback",
        rules.fallback,
        LIKELIHOOD_RANGE,
    ));
    errors.extend(check_in_range(
        "likelihoodRules.boost.cap",
        rules.boost.cap,
        LIKELIHOOD_RANGE,
    ));
    from_errors(errors)
}

fn check_er_matrix(config: &ScoringConfig) -> ConfigValidation {
    from_errors(
        config
            .er_matrix
            .cells()
            .filter_map(|(likelihood, impact, er)| {
                check_in_range(
                    &format!("erMatrix.{}.{}", likelihood, impact),
                    er,
                    ER_RANGE,
                )
            })
            .collect(),
    )
}

fn check_complexity(config: &ScoringConfig) -> ConfigValidation {
    let mapping = &config.cc_mapping;
    let mut errors: Vec<String> = mapping
        .ranges
        .iter()
        .filter_map(|rule| check_in_range("ccMapping.ranges", rule.score, CC_RANGE))
        .collect();
    errors.extend(check_in_range(
        "ccMapping.defaultBase",
        mapping.default_base,
        CC_RANGE,
    ));
    errors.extend(check_in_range("ccMapping.cap", mapping.cap, CC_RANGE));
    errors.extend(check_in_range("ccMapping.min", mapping.min, CC_RANGE));
    errors.extend(check_in_range("ccFusion.cap", config.cc_fusion.cap, CC_RANGE));
    if mapping.min > mapping.cap {
        errors.push(format!(
            "ccMapping: min {} exceeds cap {}",
            mapping.min, mapping.cap
        ));
    }
    from_errors(errors)
}

fn check_testability(config: &ScoringConfig) -> ConfigValidation {
    let mut errors: Vec<String> = config
        .testability_rules
        .scores()
        .into_iter()
        .filter_map(|(name, v)| {
            check_in_range(&format!("testabilityRules.{}", name), v, TESTABILITY_RANGE)
        })
        .collect();
    if let Some(roi) = &config.roi_rules {
        errors.extend(roi.scores().into_iter().filter_map(|(name, v)| {
            check_in_range(&format!("roiRules.{}", name), v, TESTABILITY_RANGE)
        }));
    }
    from_errors(errors)
}

fn check_table(field: &str, rules: &[RangeRule], range: SignalRange) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| check_in_range(field, rule.score, range))
        .collect()
}

fn check_range_tables(config: &ScoringConfig) -> ConfigValidation {
    let deps = &config.dependency_count_mapping;
    let coverage = &config.coverage_scoring;
    let mut errors = check_table(
        "dependencyCountMapping.ranges",
        &deps.ranges,
        DEPENDENCY_RANGE,
    );
    errors.extend(check_in_range(
        "dependencyCountMapping.defaultScore",
        deps.default_score,
        DEPENDENCY_RANGE,
    ));
    errors.extend(check_table(
        "coverageScoring.mapping",
        &coverage.mapping,
        COVERAGE_RANGE,
    ));
    errors.extend(check_in_range(
        "coverageScoring.elseScore",
        coverage.else_score,
        COVERAGE_RANGE,
    ));
    errors.extend(check_in_range(
        "coverageScoring.naScore",
        coverage.na_score,
        COVERAGE_RANGE,
    ));
    from_errors(errors)
}

fn check_overrides(config: &ScoringConfig) -> ConfigValidation {
    let ranges = [
        BC_RANGE,
        CC_RANGE,
        ER_RANGE,
        TESTABILITY_RANGE,
        TESTABILITY_RANGE,
        DEPENDENCY_RANGE,
    ];
    from_errors(
        config
            .overrides
            .tables()
            .into_iter()
            .zip(ranges)
            .flat_map(|((signal, table), range)| {
                table.iter().filter_map(move |(key, value)| {
                    check_in_range(&format!("overrides.{}.{}", signal, key), *value, range)
                })
            })
            .collect(),
    )
}

fn check_suggestions(config: &ScoringConfig) -> ConfigValidation {
    let suggestions = &config.ai_enhancement.suggestions;
    let bc = suggestions.business_critical_paths.iter().filter_map(|s| {
        check_in_range(
            &format!("aiEnhancement.businessCriticalPaths[{}].suggestedBC", s.pattern),
            s.suggested_bc,
            BC_RANGE,
        )
    });
    let er = suggestions.high_risk_modules.iter().filter_map(|s| {
        check_in_range(
            &format!("aiEnhancement.highRiskModules[{}].suggestedER", s.pattern),
            s.suggested_er,
            ER_RANGE,
        )
    });
    from_errors(bc.chain(er).collect())
}

fn check_patterns(config: &ScoringConfig) -> ConfigValidation {
    let layer_patterns = config.layers.iter().flatten().flat_map(|(name, layer)| {
        layer
            .patterns
            .iter()
            .map(move |pattern| (format!("layers.{}.patterns", name), pattern.as_str()))
    });
    let suggestion_patterns = config
        .ai_enhancement
        .suggestions
        .patterns()
        .map(|pattern| ("aiEnhancement.suggestions".to_string(), pattern));

    from_errors(
        layer_patterns
            .chain(suggestion_patterns)
            .filter_map(|(field, pattern)| {
                glob::Pattern::new(pattern)
                    .err()
                    .map(|e| format!("{}: invalid glob pattern `{}`: {}", field, pattern, e))
            })
            .collect(),
    )
}

fn check_misc(config: &ScoringConfig) -> ConfigValidation {
    let mut errors = Vec::new();
    if config.round.digits > 10 {
        errors.push(format!(
            "round.digits: {} exceeds the supported maximum of 10",
            config.round.digits
        ));
    }
    let boost = &config.coverage_boost;
    if boost.enable && !(boost.threshold > 0.0 && boost.threshold <= 100.0) {
        errors.push(format!(
            "coverageBoost.threshold: {} must be in (0, 100]",
            boost.threshold
        ));
    }
    if boost.max_boost < 0.0 || boost.scale < 0.0 {
        errors.push("coverageBoost: maxBoost and scale must be non-negative".to_string());
    }
    from_errors(errors)
}
