// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod graph;
pub mod io;
pub mod layer;
pub mod priority;
pub mod signals;

// Re-export commonly used types
pub use crate::core::{
    ComplexityMetrics, ConfigError, DependencyGraphNode, GitSignal, Layer, Priority,
    ScoredTarget, ScoringError, SignalScores, Target, TargetKind, TargetMetadata,
};

pub use crate::config::{load_config, PresetLevel, ScoringConfig, ScoringMode};

pub use crate::engine::{BatchOutcome, ScoringEngine, ScoringInputs};

pub use crate::graph::{DependencyGraph, ImportMap};

pub use crate::layer::LayerResolver;

pub use crate::signals::CoverageSummary;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
