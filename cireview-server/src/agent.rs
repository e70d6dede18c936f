//! Repository analysis pipeline
//!
//! Recognize → fetch README → request review → assemble report, run
//! sequentially with early return on failure.

use cireview_core::report::{ReviewReport, TeamInfo};
use cireview_core::ReviewRequester;
use cireview_github::{ReadmeFetcher, RepositoryReference};
use serde::Deserialize;
use tracing::{error, info, warn};

/// Error reported for locators the recognizer rejects
pub const INVALID_URL: &str = "Invalid GitHub URL";

/// Error reported when the repository field is missing or blank
pub const REPO_REQUIRED: &str = "Repository URL required";

/// A request to analyze one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    /// Repository locator as supplied
    pub repo: String,
    /// Echoed team metadata
    pub team: TeamInfo,
}

/// Wire shape of a run request; non-string fields read as empty
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunRequestBody {
    #[serde(default, deserialize_with = "lenient_string")]
    repo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    team_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    leader_name: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

impl RunRequest {
    /// Create a request
    pub fn new(repo: impl Into<String>, team: TeamInfo) -> Self {
        Self {
            repo: repo.into(),
            team,
        }
    }

    /// Parse a JSON request body
    ///
    /// Anything that is not a JSON object is treated as an empty request.
    pub fn from_json(body: &[u8]) -> Self {
        let parsed = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => {
                RunRequestBody::deserialize(value).unwrap_or_default()
            }
            _ => RunRequestBody::default(),
        };
        Self {
            repo: parsed.repo,
            team: TeamInfo::new(parsed.team_name, parsed.leader_name),
        }
    }
}

/// Result of running the pipeline for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No repository was supplied
    MissingRepo,
    /// The repository locator was not recognized
    Rejected(ReviewReport),
    /// A downstream step failed
    Failed(ReviewReport),
    /// The analysis completed
    Completed(ReviewReport),
}

impl RunOutcome {
    /// The report carried by this outcome, if any
    pub fn report(&self) -> Option<&ReviewReport> {
        match self {
            RunOutcome::MissingRepo => None,
            RunOutcome::Rejected(r) | RunOutcome::Failed(r) | RunOutcome::Completed(r) => Some(r),
        }
    }
}

/// Runs the analysis pipeline
#[derive(Debug, Clone)]
pub struct RepoAgent {
    readme: ReadmeFetcher,
    reviewer: ReviewRequester,
    retry_limit: u32,
}

impl RepoAgent {
    /// Create an agent from its collaborators
    pub fn new(readme: ReadmeFetcher, reviewer: ReviewRequester, retry_limit: u32) -> Self {
        Self {
            readme,
            reviewer,
            retry_limit,
        }
    }

    /// Retry limit echoed in reports
    pub fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    /// Whether the review generator has credentials
    pub fn is_configured(&self) -> bool {
        self.reviewer.is_configured()
    }

    /// Run the full pipeline for a request
    pub async fn run(&self, request: &RunRequest) -> RunOutcome {
        let repo_input = request.repo.trim();

        info!(
            repo = %repo_input,
            team_name = %request.team.team_name,
            leader_name = %request.team.team_leader,
            "run-agent received"
        );

        if repo_input.is_empty() {
            return RunOutcome::MissingRepo;
        }

        let repo = match RepositoryReference::recognize(repo_input) {
            Ok(repo) => repo,
            Err(e) => {
                warn!(error = %e, "Rejected repository locator");
                return RunOutcome::Rejected(ReviewReport::failure(
                    repo_input,
                    &request.team,
                    self.retry_limit,
                    INVALID_URL,
                ));
            }
        };

        match self.analyze(&repo, &request.team).await {
            Ok(report) => RunOutcome::Completed(report),
            Err(e) => {
                error!(repo = %repo, error = %e, "run-agent failed");
                let message = e.to_string();
                let message = if message.is_empty() {
                    "Analysis failed".to_string()
                } else {
                    message
                };
                RunOutcome::Failed(ReviewReport::failure(
                    repo.canonical_url(),
                    &request.team,
                    self.retry_limit,
                    message,
                ))
            }
        }
    }

    /// Analyze a recognized repository
    pub async fn analyze(
        &self,
        repo: &RepositoryReference,
        team: &TeamInfo,
    ) -> cireview_core::Result<ReviewReport> {
        let readme = self.readme.fetch_for(repo).await;
        let analysis = self
            .reviewer
            .request(repo.canonical_url(), &readme.content)
            .await?;

        Ok(ReviewReport::success(
            repo.canonical_url(),
            team,
            self.retry_limit,
            &analysis,
            readme.found,
        ))
    }
}
