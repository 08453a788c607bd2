use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "testrank")]
#[command(
    about = "Rank functions and components by how urgently they need tests",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    ///
    /// -v: info, -vv: per-target signal breakdown, -vvv: trace.
    /// RUST_LOG overrides this.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score targets and bucket them into P0..P3
    Score {
        /// Scanner output: JSON array of targets
        #[arg(short, long)]
        targets: PathBuf,

        /// Complexity metrics keyed by `path#name`
        #[arg(short, long)]
        metrics: Option<PathBuf>,

        /// Git signals keyed by file path
        #[arg(long)]
        git: Option<PathBuf>,

        /// Istanbul-style coverage summary (coverage-summary.json)
        #[arg(long)]
        coverage: Option<PathBuf>,

        /// Import map (`{file: [specifier, ...]}`) for the dependency graph
        #[arg(long)]
        imports: Option<PathBuf>,

        /// Configuration file (defaults to discovering .testrank.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// AI analysis output; enables the suggestion overlay
        #[arg(long = "ai-suggestions")]
        ai_suggestions: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when any target cannot be scored instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Show only top N targets
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,
    },

    /// Write a default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Configuration preset
        #[arg(long, value_enum, default_value = "legacy")]
        preset: Preset,

        /// Where to write the file
        #[arg(long, default_value = ".testrank.json")]
        path: PathBuf,
    },

    /// Validate a configuration file and report every problem
    CheckConfig {
        /// Configuration file (defaults to discovering .testrank.json)
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Flat BC/CC/ER/ROI weights
    Legacy,
    /// Per-layer weights and thresholds
    Layered,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<Preset> for crate::config::PresetLevel {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Legacy => crate::config::PresetLevel::Legacy,
            Preset::Layered => crate::config::PresetLevel::Layered,
        }
    }
}
