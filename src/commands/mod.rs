//! CLI command implementations for testrank.
//!
//! Available commands:
//! - **score**: Score targets and bucket them into priorities
//! - **init**: Write a default configuration file
//! - **check-config**: Validate a configuration file and list every problem

pub mod check_config;
pub mod init;
pub mod score;

pub use check_config::{check_config, check_config_file, ConfigReport};
pub use init::init_config;
pub use score::{handle_score, run_scoring, ScoreConfig};
