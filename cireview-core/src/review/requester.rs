//! Review requests against a text generation service

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::info;

use super::prompt::{render_prompt, truncate_chars};
use crate::{Error, Result};

/// Log tag for repository analysis requests
const TAG: &str = "repoAnalysis";

/// Maximum characters of prompt/response text written to the log
const LOG_PREVIEW_CHARS: usize = 2400;

/// Trait for text generation services
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the name of this generator
    fn name(&self) -> &'static str;

    /// Whether the generator has the credentials it needs
    fn is_configured(&self) -> bool;

    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Builds analysis prompts and validates the generated review
#[derive(Clone)]
pub struct ReviewRequester {
    generator: Arc<dyn TextGenerator>,
}

impl ReviewRequester {
    /// Create a requester backed by the given generator
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Whether the underlying generator is configured
    pub fn is_configured(&self) -> bool {
        self.generator.is_configured()
    }

    /// Request a prose review of a repository
    ///
    /// Returns the trimmed review text. Fails with [`Error::EmptyResponse`]
    /// when the service answers with only whitespace.
    pub async fn request(&self, repo_url: &str, readme: &str) -> Result<String> {
        let prompt = render_prompt(repo_url, readme);
        let started = Instant::now();

        info!(
            tag = TAG,
            generator = self.generator.name(),
            "prompt:\n{}",
            log_preview(&prompt)
        );

        let text = self.generator.generate(&prompt).await?;
        let trimmed = text.trim();

        info!(
            tag = TAG,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response:\n{}",
            log_preview(trimmed)
        );

        if trimmed.is_empty() {
            return Err(Error::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}

impl std::fmt::Debug for ReviewRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewRequester")
            .field("generator", &self.generator.name())
            .finish()
    }
}

fn log_preview(text: &str) -> String {
    let total = text.chars().count();
    if total <= LOG_PREVIEW_CHARS {
        return text.to_string();
    }
    format!(
        "{}\n… [truncated {} chars]",
        truncate_chars(text, LOG_PREVIEW_CHARS),
        total - LOG_PREVIEW_CHARS
    )
}
