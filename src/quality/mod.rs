//! Quality validation module
//!
//! Scores synthesized audio before it is delivered.

pub mod analyzer;

pub use analyzer::{AudioQualityAnalyzer, QualityLevel, QualityReport};
