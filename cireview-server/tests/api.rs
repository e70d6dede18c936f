//! End-to-end tests for the HTTP API with stubbed collaborators

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use cireview_core::{Config, Error as CoreError, TextGenerator};
use cireview_github::{Error as GitHubError, RawContentSource, RawResponse};
use cireview_server::api::MAX_BODY_BYTES;
use cireview_server::{api_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const RAW_BASE: &str = "http://raw.test";

/// Serves README bodies by URL; anything else fails like a dead host
#[derive(Default)]
struct StubSource {
    bodies: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    fn with_readme(owner: &str, repo: &str, branch: &str, body: &str) -> Self {
        let mut source = Self::default();
        source.bodies.insert(
            format!("{}/{}/{}/{}/README.md", RAW_BASE, owner, repo, branch),
            body.to_string(),
        );
        source
    }
}

#[async_trait]
impl RawContentSource for StubSource {
    async fn get_raw(
        &self,
        url: &str,
        _timeout: Duration,
    ) -> cireview_github::Result<RawResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some(body) => Ok(RawResponse {
                status: 200,
                body: body.clone(),
            }),
            None => Err(GitHubError::Transport("connection refused".to_string())),
        }
    }
}

enum Reply {
    Text(&'static str),
    MissingKey,
}

struct StubGenerator {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_configured(&self) -> bool {
        !matches!(self.reply, Reply::MissingKey)
    }

    async fn generate(&self, prompt: &str) -> cireview_core::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::MissingKey => Err(CoreError::MissingApiKey),
        }
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.agent.raw_base_url = RAW_BASE.to_string();
    config
}

fn app(source: Arc<StubSource>, generator: Arc<StubGenerator>) -> axum::Router {
    api_router(Arc::new(AppState::new(test_config(), source, generator)))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_run(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let request = Request::post("/api/run-agent")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_missing_repo_is_bad_request() {
    let app = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::Text("unused")),
    );

    let (status, body) = post_run(app, "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Repository URL required"}));
}

#[tokio::test]
async fn test_blank_or_unparsable_body_is_bad_request() {
    for payload in [
        r#"{"repo": "   "}"#,
        "not json",
        r#"{"repo": 7}"#,
        r#"["https://github.com/owner/repo", "Crabs", "Ferris"]"#,
    ] {
        let app = app(
            Arc::new(StubSource::default()),
            StubGenerator::new(Reply::Text("unused")),
        );
        let (status, body) = post_run(app, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(body, json!({"error": "Repository URL required"}));
    }
}

#[tokio::test]
async fn test_invalid_url_is_bad_request_report() {
    let source = Arc::new(StubSource::default());
    let generator = StubGenerator::new(Reply::Text("unused"));
    let app = app(source.clone(), generator.clone());

    let (status, body) = post_run(app, r#"{"repo": "not a url", "teamName": "Crabs"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid GitHub URL");
    assert_eq!(body["score"], 0);
    assert_eq!(body["ci_status"], "FAILED");
    assert_eq!(body["repo"], "not a url");
    assert_eq!(body["team_name"], "Crabs");
    assert_eq!(body["retry_limit"], 1);
    assert!(source.calls.lock().unwrap().is_empty());
    assert!(generator.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_success_with_readme() {
    let source = Arc::new(StubSource::with_readme(
        "owner",
        "repo",
        "HEAD",
        "# Repo\nBuilt with cargo.",
    ));
    let generator = StubGenerator::new(Reply::Text("  Rust workspace with CI gaps.  "));
    let app = app(source, generator.clone());

    let (status, body) = post_run(
        app,
        r#"{"repo": "https://github.com/owner/repo.git", "teamName": " Crabs ", "leaderName": "Ferris"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ci_status"], "PASSED");
    assert_eq!(body["score"], 100);
    assert_eq!(body["score_breakdown"]["efficiency_penalty"], 0);
    assert_eq!(body["repo"], "https://github.com/owner/repo.git");
    assert_eq!(body["team_name"], "Crabs");
    assert_eq!(body["team_leader"], "Ferris");
    assert_eq!(body["analysis_summary"], "Rust workspace with CI gaps.");
    assert_eq!(body["total_time_ms"], 450);
    assert_eq!(body["run_log"].as_array().unwrap().len(), 4);
    assert_eq!(body["timeline"].as_array().unwrap().len(), 3);
    assert!(body.get("error").is_none());

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("Built with cargo."));
}

#[tokio::test]
async fn test_success_without_readme() {
    let source = Arc::new(StubSource::default());
    let app = app(source.clone(), StubGenerator::new(Reply::Text("Prose.")));

    let (status, body) = post_run(app, r#"{"repo": "git@github.com:owner/repo.git"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 80);
    assert_eq!(body["score_breakdown"]["efficiency_penalty"], 20);
    assert_eq!(body["run_log"][1]["msg"], "README not found, using minimal context");
    assert_eq!(source.calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_generation_failure_is_server_error() {
    let app = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::MissingKey),
    );

    let (status, body) = post_run(app, r#"{"repo": "https://github.com/owner/repo"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ci_status"], "FAILED");
    assert_eq!(body["score"], 0);
    assert_eq!(body["error"], "GEMINI_API_KEY not configured");
    assert_eq!(body["repo"], "https://github.com/owner/repo");
}

#[tokio::test]
async fn test_empty_generation_is_server_error() {
    let app = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::Text("   ")),
    );

    let (status, body) = post_run(app, r#"{"repo": "https://github.com/owner/repo"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Empty Gemini response");
}

#[tokio::test]
async fn test_results_is_empty_stub() {
    let app = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::Text("unused")),
    );

    let (status, body) = get(app, "/api/results").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["repo"], "");
    assert_eq!(body["ci_status"], "");
    assert_eq!(body["score"], 0);
    assert_eq!(body["retry_limit"], 1);
    assert_eq!(body["analysis_summary"], "");
    assert_eq!(
        body["score_breakdown"],
        json!({"base": 100, "speed_bonus": 0, "efficiency_penalty": 0})
    );
}

#[tokio::test]
async fn test_health_reports_configuration() {
    let configured = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::Text("x")),
    );
    let (status, body) = get(configured, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"ok": true, "geminiConfigured": true, "mode": "lite-repo-analysis"})
    );

    let unconfigured = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::MissingKey),
    );
    let (_, body) = get(unconfigured, "/api/health").await;
    assert_eq!(body["geminiConfigured"], false);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let generator = StubGenerator::new(Reply::Text("unused"));
    let server = app(Arc::new(StubSource::default()), generator.clone());

    let padding = "x".repeat(MAX_BODY_BYTES);
    let body = format!(r#"{{"repo": "https://github.com/owner/repo", "pad": "{}"}}"#, padding);
    let request = Request::post("/api/run-agent")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = server.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(generator.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/run-agent")
        .header("origin", "http://dashboard.test")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let server = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::Text("unused")),
    );
    let response = server.oneshot(preflight).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let simple = Request::get("/api/health")
        .header("origin", "http://dashboard.test")
        .body(Body::empty())
        .unwrap();
    let server = app(
        Arc::new(StubSource::default()),
        StubGenerator::new(Reply::Text("unused")),
    );
    let response = server.oneshot(simple).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
