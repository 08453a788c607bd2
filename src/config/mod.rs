// Sub-modules
pub mod presets;
pub mod rules;
mod scoring;
mod signals;

// Core configuration types
mod core;
mod loader;
pub mod validation;

// Re-export combiner configuration
pub use scoring::{
    CoverageBoostConfig, LayerConfig, LayerThresholds, LayerWeights, LegacyWeights, RoundConfig,
    ScoringMode, Thresholds,
};

// Re-export signal mapper configuration
pub use signals::{
    CcFusion, CcMapping, CoverageScoring, DepGraphConfig, DependencyCountMapping, ErMatrix,
    LikelihoodBoost, LikelihoodRules, LocBonus, MetricAdjustment, PlatformAdjust,
    TestabilityRules, DEFAULT_ER,
};

// Re-export rule types
pub use rules::{
    first_match, CompareOp, CounterRule, KeywordBucket, KeywordBuckets, RangeRule, ScoreRule,
    ThresholdRule,
};

// Re-export core types
pub use self::core::{
    AiEnhancement, AiSuggestions, BusinessCriticalSuggestion, HighRiskSuggestion, Overrides,
    ScoringConfig, TestabilityAdjustment,
};

// Re-export loader functions
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path, parse_config,
    parse_and_validate_config, strip_json_comments, ConfigFormat, CONFIG_FILE_NAMES,
};

pub(crate) use loader::read_config_file;
pub use presets::PresetLevel;
pub use validation::{
    combine_validations, validate, validate_config, validate_config_result, ConfigValidation,
};
