//! CLI command implementations

pub mod analyze;
pub mod config;
pub mod serve;

pub use analyze::AnalyzeArgs;
