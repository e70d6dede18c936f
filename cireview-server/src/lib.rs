//! cireview server - HTTP API for cireview repository analysis
//!
//! Exposes the analysis pipeline as `POST /api/run-agent`, plus
//! `GET /api/results` and `GET /api/health`.

pub mod agent;
pub mod api;

use std::net::SocketAddr;
use std::sync::Arc;

use cireview_core::{Config, GeminiClient, ReviewRequester, TextGenerator};
use cireview_github::{HttpRawSource, RawContentSource, ReadmeFetcher};
use tokio::net::TcpListener;
use tracing::info;

pub use agent::{RepoAgent, RunOutcome, RunRequest};
pub use api::api_router;

/// Shared, read-only server state
#[derive(Debug)]
pub struct AppState {
    /// Effective configuration
    pub config: Config,
    /// Analysis pipeline
    pub agent: RepoAgent,
}

impl AppState {
    /// Build state from configuration and explicit collaborators
    pub fn new(
        config: Config,
        raw_source: Arc<dyn RawContentSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let readme = ReadmeFetcher::from_config(raw_source, &config.agent);
        let reviewer = ReviewRequester::new(generator);
        let agent = RepoAgent::new(readme, reviewer, config.agent.retry_limit);
        Self { config, agent }
    }

    /// Build state with the production HTTP source and Gemini client
    pub fn from_config(config: Config, api_key: Option<String>) -> cireview_github::Result<Self> {
        let raw_source = Arc::new(HttpRawSource::new()?);
        let generator = Arc::new(GeminiClient::new(&config.gemini, api_key));
        Ok(Self::new(config, raw_source, generator))
    }
}

/// Serve the API on all interfaces at the configured port
pub async fn serve(state: Arc<AppState>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server.port));
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        gemini_configured = state.agent.is_configured(),
        "cireview listening"
    );

    axum::serve(listener, api_router(state)).await
}
