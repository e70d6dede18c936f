//! Best-effort README retrieval
//!
//! Candidate branches are tried strictly in order against the raw-content
//! host. The first attempt that returns a 2xx status with a non-empty body
//! wins. Every other outcome, transport failures included, moves on to the
//! next candidate; exhausting all candidates is a normal result.

use std::sync::Arc;
use std::time::Duration;

use cireview_core::config::AgentConfig;
use tracing::{debug, info, warn};

use crate::{Error, RawContentSource, RawResponse, RepositoryReference, Result};

/// Branch references tried in order; `HEAD` is the default-branch alias
pub const CANDIDATE_BRANCHES: [&str; 3] = ["HEAD", "main", "master"];

/// Outcome of README retrieval
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadmeResult {
    /// Whether any candidate yielded content
    pub found: bool,
    /// README text, empty when not found
    pub content: String,
    /// URL the content came from, empty when not found
    pub source_url: String,
}

impl ReadmeResult {
    /// Result when no candidate produced content
    pub fn not_found() -> Self {
        Self::default()
    }

    fn found(content: String, source_url: String) -> Self {
        Self {
            found: true,
            content,
            source_url,
        }
    }
}

/// Outcome of a single candidate request
#[derive(Debug)]
pub enum Attempt {
    /// 2xx with a non-empty body
    Found(String),
    /// Non-2xx status
    Unsuccessful(u16),
    /// 2xx with an empty body
    Empty,
    /// Transport failure or timeout
    Failed(Error),
}

impl From<Result<RawResponse>> for Attempt {
    fn from(outcome: Result<RawResponse>) -> Self {
        match outcome {
            Ok(response) if !response.is_success() => Attempt::Unsuccessful(response.status),
            Ok(response) if response.body.is_empty() => Attempt::Empty,
            Ok(response) => Attempt::Found(response.body),
            Err(e) => Attempt::Failed(e),
        }
    }
}

/// Fetches README content across the candidate branches
#[derive(Clone)]
pub struct ReadmeFetcher {
    source: Arc<dyn RawContentSource>,
    base_url: String,
    timeout: Duration,
}

impl ReadmeFetcher {
    /// Create a fetcher against a raw-content base URL
    pub fn new(
        source: Arc<dyn RawContentSource>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            source,
            base_url,
            timeout,
        }
    }

    /// Create a fetcher from agent configuration
    pub fn from_config(source: Arc<dyn RawContentSource>, config: &AgentConfig) -> Self {
        Self::new(source, config.raw_base_url.clone(), config.readme_timeout)
    }

    /// Raw-content URL of the README on one branch
    pub fn candidate_url(&self, owner: &str, repo: &str, branch: &str) -> String {
        format!("{}/{}/{}/{}/README.md", self.base_url, owner, repo, branch)
    }

    /// Try one candidate URL
    pub async fn attempt(&self, url: &str) -> Attempt {
        self.source.get_raw(url, self.timeout).await.into()
    }

    /// Fetch the README of a recognized repository
    pub async fn fetch_for(&self, repo: &RepositoryReference) -> ReadmeResult {
        self.fetch(repo.owner(), repo.repo()).await
    }

    /// Fetch a README, falling back across [`CANDIDATE_BRANCHES`]
    pub async fn fetch(&self, owner: &str, repo: &str) -> ReadmeResult {
        for branch in CANDIDATE_BRANCHES {
            let url = self.candidate_url(owner, repo, branch);

            match self.attempt(&url).await {
                Attempt::Found(content) => {
                    info!(url = %url, bytes = content.len(), "Fetched README");
                    return ReadmeResult::found(content, url);
                }
                Attempt::Unsuccessful(status) => {
                    debug!(url = %url, status, "README not available on branch");
                }
                Attempt::Empty => {
                    debug!(url = %url, "README empty on branch");
                }
                Attempt::Failed(e) => {
                    warn!(url = %url, error = %e, "README fetch failed");
                }
            }
        }

        info!(owner = %owner, repo = %repo, "No README found on any candidate branch");
        ReadmeResult::not_found()
    }
}

impl std::fmt::Debug for ReadmeFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadmeFetcher")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
