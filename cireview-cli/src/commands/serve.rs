//! Serve command - Run the HTTP API

use std::sync::Arc;

use cireview_core::{Config, Secrets};
use cireview_server::{serve, AppState};

/// Start the server and run until it stops
pub async fn execute(config: Config) -> anyhow::Result<()> {
    let api_key = Secrets::load()?.gemini_api_key();
    if api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not configured; analysis requests will fail");
    }

    let state = Arc::new(AppState::from_config(config, api_key)?);
    serve(state).await?;
    Ok(())
}
