//! Signal mappers: pure functions from one category of evidence to a
//! bounded integer score. Every mapper checks its override table first.

pub mod business;
pub mod complexity;
pub mod coverage;
pub mod dependency;
pub mod error_risk;
pub mod testability;

pub use business::{business_criticality, business_impact, is_main_chain};
pub use complexity::complexity;
pub use coverage::{coverage_score, CoverageSummary, FileCoverage, LineCoverage};
pub use dependency::dependency_count;
pub use error_risk::{error_risk, likelihood};
pub use testability::{roi, testability};
