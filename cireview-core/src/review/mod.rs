//! Review module for repository analysis
//!
//! Builds the analysis prompt, sends it to a text generation service and
//! validates that the answer is usable prose.

pub mod gemini;
pub mod prompt;
pub mod requester;

pub use gemini::GeminiClient;
pub use prompt::{render_prompt, truncate_chars, README_SNIPPET_CHARS};
pub use requester::{ReviewRequester, TextGenerator};
