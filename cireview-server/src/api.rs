//! HTTP handlers for the analysis API

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use cireview_core::ReviewReport;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agent::{RunOutcome, RunRequest, REPO_REQUIRED};
use crate::AppState;

/// Maximum accepted request body size
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Mode reported by the health endpoint
pub const MODE: &str = "lite-repo-analysis";

/// Build the API router
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/run-agent", post(run_agent))
        .route("/api/results", get(results))
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn run_agent(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request = RunRequest::from_json(&body);
    outcome_response(state.agent.run(&request).await)
}

/// Map a pipeline outcome onto status code and body
pub fn outcome_response(outcome: RunOutcome) -> Response {
    match outcome {
        RunOutcome::MissingRepo => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": REPO_REQUIRED })),
        )
            .into_response(),
        RunOutcome::Rejected(report) => (StatusCode::BAD_REQUEST, Json(report)).into_response(),
        RunOutcome::Failed(report) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response()
        }
        RunOutcome::Completed(report) => (StatusCode::OK, Json(report)).into_response(),
    }
}

/// Stateless stub: no run is ever stored
async fn results(State(state): State<Arc<AppState>>) -> Json<ReviewReport> {
    Json(ReviewReport::empty(state.agent.retry_limit()))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "ok": true,
        "geminiConfigured": state.agent.is_configured(),
        "mode": MODE,
    }))
}
