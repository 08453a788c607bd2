pub mod errors;
pub mod types;

pub use errors::{ConfigError, ScoringError};
pub use types::{
    normalize_path, target_key, CodeHints, ComplexityMetrics, DependencyGraphNode, GitSignal,
    Layer, Priority, ScoredTarget, SignalScores, Target, TargetKind, TargetMetadata,
};
