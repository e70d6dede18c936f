//! CI-run style report assembly
//!
//! The report has a fixed shape. Apart from the repository identity, the team
//! metadata and the analysis prose, its fields are synthetic: the score is
//! derived only from whether a README was found, and the timeline and run log
//! are constants.

use serde::{Deserialize, Serialize};

/// Total run time reported for a successful analysis
pub const SUCCESS_TOTAL_TIME_MS: u64 = 450;

/// Base score before penalties
pub const BASE_SCORE: u32 = 100;

/// Penalty applied when no README could be retrieved
pub const MISSING_README_PENALTY: u32 = 20;

/// Summary used when the analysis prose is empty
pub const NO_ANALYSIS: &str = "No analysis available.";

/// Team metadata echoed back in every report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    /// Team name
    pub team_name: String,
    /// Team leader name
    pub team_leader: String,
}

impl TeamInfo {
    /// Create team info, trimming both values
    pub fn new(team_name: impl AsRef<str>, team_leader: impl AsRef<str>) -> Self {
        Self {
            team_name: team_name.as_ref().trim().to_string(),
            team_leader: team_leader.as_ref().trim().to_string(),
        }
    }
}

/// Score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Starting score
    pub base: u32,
    /// Always zero
    pub speed_bonus: u32,
    /// Deducted when no README was found
    pub efficiency_penalty: u32,
}

impl Default for ScoreBreakdown {
    fn default() -> Self {
        Self {
            base: BASE_SCORE,
            speed_bonus: 0,
            efficiency_penalty: 0,
        }
    }
}

/// A single timeline event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Offset from run start in ms
    pub time: u64,
    /// Event name (START, ANALYSIS, DONE)
    pub event: String,
    /// Whether the step passed, for steps that can fail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
}

impl TimelineEvent {
    fn new(time: u64, event: &str) -> Self {
        Self {
            time,
            event: event.to_string(),
            passed: None,
        }
    }

    fn with_passed(mut self, passed: bool) -> Self {
        self.passed = Some(passed);
        self
    }
}

/// A single run log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLogEntry {
    /// Offset from run start in ms
    pub t: u64,
    /// Log message
    pub msg: String,
}

impl RunLogEntry {
    fn new(t: u64, msg: impl Into<String>) -> Self {
        Self { t, msg: msg.into() }
    }
}

/// The report returned by the analysis endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Repository locator as received
    pub repo: String,
    /// Echoed team name
    pub team_name: String,
    /// Echoed team leader
    pub team_leader: String,
    /// Always empty; no branch is created
    pub branch: String,
    /// Always zero
    pub total_failures: u32,
    /// Always zero
    pub total_fixes: u32,
    /// `PASSED`, `FAILED`, or empty for the stub report
    pub ci_status: String,
    /// 1 for a completed analysis, otherwise 0
    pub iterations_used: u32,
    /// Configured retry limit
    pub retry_limit: u32,
    /// Final score
    pub score: u32,
    /// Synthetic run duration in ms
    pub total_time_ms: u64,
    /// How the score was computed
    pub score_breakdown: ScoreBreakdown,
    /// Always empty
    pub fixes: Vec<serde_json::Value>,
    /// Synthetic step timeline
    pub timeline: Vec<TimelineEvent>,
    /// Synthetic run log
    pub run_log: Vec<RunLogEntry>,
    /// Generated review prose
    pub analysis_summary: String,
    /// Failure message, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewReport {
    /// Report for a completed analysis
    pub fn success(
        repo_url: &str,
        team: &TeamInfo,
        retry_limit: u32,
        analysis: &str,
        readme_found: bool,
    ) -> Self {
        let efficiency_penalty = if readme_found {
            0
        } else {
            MISSING_README_PENALTY
        };
        let score = BASE_SCORE - efficiency_penalty;

        let readme_msg = if readme_found {
            "Fetched README for analysis"
        } else {
            "README not found, using minimal context"
        };

        let run_log = vec![
            RunLogEntry::new(0, format!("Received repository {}", repo_url)),
            RunLogEntry::new(80, readme_msg),
            RunLogEntry::new(
                200,
                "Analyzed repository with Gemini (stack, structure, tests, CI)",
            ),
            RunLogEntry::new(400, format!("Computed repository score = {}", score)),
        ];

        let timeline = vec![
            TimelineEvent::new(0, "START"),
            TimelineEvent::new(150, "ANALYSIS").with_passed(true),
            TimelineEvent::new(SUCCESS_TOTAL_TIME_MS, "DONE"),
        ];

        let analysis_summary = if analysis.is_empty() {
            NO_ANALYSIS.to_string()
        } else {
            analysis.to_string()
        };

        Self {
            repo: repo_url.to_string(),
            team_name: team.team_name.clone(),
            team_leader: team.team_leader.clone(),
            ci_status: "PASSED".to_string(),
            iterations_used: 1,
            score,
            total_time_ms: SUCCESS_TOTAL_TIME_MS,
            score_breakdown: ScoreBreakdown {
                efficiency_penalty,
                ..ScoreBreakdown::default()
            },
            timeline,
            run_log,
            analysis_summary,
            ..Self::empty(retry_limit)
        }
    }

    /// Report for a rejected or failed analysis
    pub fn failure(
        repo: &str,
        team: &TeamInfo,
        retry_limit: u32,
        error: impl Into<String>,
    ) -> Self {
        Self {
            repo: repo.to_string(),
            team_name: team.team_name.clone(),
            team_leader: team.team_leader.clone(),
            ci_status: "FAILED".to_string(),
            error: Some(error.into()),
            ..Self::empty(retry_limit)
        }
    }

    /// Report with every field at its empty default
    pub fn empty(retry_limit: u32) -> Self {
        Self {
            repo: String::new(),
            team_name: String::new(),
            team_leader: String::new(),
            branch: String::new(),
            total_failures: 0,
            total_fixes: 0,
            ci_status: String::new(),
            iterations_used: 0,
            retry_limit,
            score: 0,
            total_time_ms: 0,
            score_breakdown: ScoreBreakdown::default(),
            fixes: Vec::new(),
            timeline: Vec::new(),
            run_log: Vec::new(),
            analysis_summary: String::new(),
            error: None,
        }
    }

    /// Whether this report describes a passing run
    pub fn passed(&self) -> bool {
        self.ci_status == "PASSED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team() -> TeamInfo {
        TeamInfo::new(" Rustaceans ", "Ferris")
    }

    #[test]
    fn test_team_info_trims() {
        let team = team();
        assert_eq!(team.team_name, "Rustaceans");
        assert_eq!(team.team_leader, "Ferris");
    }

    #[test]
    fn test_success_with_readme() {
        let report = ReviewReport::success(
            "https://github.com/owner/repo",
            &team(),
            1,
            "Looks healthy.",
            true,
        );

        assert!(report.passed());
        assert_eq!(report.score, 100);
        assert_eq!(report.score_breakdown.efficiency_penalty, 0);
        assert_eq!(report.iterations_used, 1);
        assert_eq!(report.total_time_ms, 450);
        assert_eq!(report.run_log.len(), 4);
        assert_eq!(report.run_log[1].msg, "Fetched README for analysis");
        assert_eq!(report.run_log[3].msg, "Computed repository score = 100");
        assert_eq!(report.analysis_summary, "Looks healthy.");
        assert!(report.error.is_none());
    }

    #[test]
    fn test_success_without_readme() {
        let report =
            ReviewReport::success("https://github.com/owner/repo", &team(), 1, "Prose.", false);

        assert_eq!(report.score, 80);
        assert_eq!(report.score_breakdown.efficiency_penalty, 20);
        assert_eq!(report.score_breakdown.base, 100);
        assert_eq!(report.run_log[1].msg, "README not found, using minimal context");
        assert_eq!(report.run_log[3].msg, "Computed repository score = 80");
    }

    #[test]
    fn test_success_empty_analysis_falls_back() {
        let report = ReviewReport::success("u", &TeamInfo::default(), 1, "", true);
        assert_eq!(report.analysis_summary, NO_ANALYSIS);
    }

    #[test]
    fn test_success_json_shape() {
        let report = ReviewReport::success("https://github.com/o/r", &team(), 2, "Prose.", true);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["retry_limit"], 2);
        assert_eq!(value["ci_status"], "PASSED");
        assert_eq!(value["branch"], "");
        assert_eq!(value["fixes"], json!([]));
        assert_eq!(
            value["timeline"],
            json!([
                {"time": 0, "event": "START"},
                {"time": 150, "event": "ANALYSIS", "passed": true},
                {"time": 450, "event": "DONE"},
            ])
        );
        assert_eq!(
            value["run_log"][0],
            json!({"t": 0, "msg": "Received repository https://github.com/o/r"})
        );
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let report = ReviewReport::failure("not a url", &team(), 1, "Invalid GitHub URL");
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["ci_status"], "FAILED");
        assert_eq!(value["score"], 0);
        assert_eq!(value["iterations_used"], 0);
        assert_eq!(value["total_time_ms"], 0);
        assert_eq!(
            value["score_breakdown"],
            json!({"base": 100, "speed_bonus": 0, "efficiency_penalty": 0})
        );
        assert_eq!(value["timeline"], json!([]));
        assert_eq!(value["run_log"], json!([]));
        assert_eq!(value["analysis_summary"], "");
        assert_eq!(value["error"], "Invalid GitHub URL");
        assert_eq!(value["repo"], "not a url");
        assert_eq!(value["team_name"], "Rustaceans");
    }

    #[test]
    fn test_empty_report() {
        let report = ReviewReport::empty(3);
        assert_eq!(report.ci_status, "");
        assert_eq!(report.retry_limit, 3);
        assert_eq!(report.score_breakdown.base, 100);
        assert!(!report.passed());
        assert!(report.error.is_none());
    }
}
