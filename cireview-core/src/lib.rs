//! cireview core - Core library for cireview repository analysis
//!
//! This crate provides configuration, secrets, the review prompt and text
//! generation seam, and assembly of the CI-run style report.

pub mod config;
pub mod error;
pub mod report;
pub mod review;
pub mod secrets;

pub use config::Config;
pub use error::{Error, Result};
pub use report::{ReviewReport, RunLogEntry, ScoreBreakdown, TeamInfo, TimelineEvent};
pub use review::{GeminiClient, ReviewRequester, TextGenerator};
pub use secrets::Secrets;
