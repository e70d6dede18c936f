//! Gemini text generation client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::requester::TextGenerator;
use crate::config::GeminiConfig;
use crate::{Error, Result};

/// Upper bound on a single generateContent call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Client for the Gemini generateContent REST API
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client from configuration and an optional API key
    ///
    /// A missing key is not an error here; each call fails instead.
    pub fn new(config: &GeminiConfig, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(Error::Generation(format!("status {}: {}", status, text)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("invalid response body: {}", e)))?;

        Ok(parsed.text())
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("configured", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            model: "gemini-1.5-flash".to_string(),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), "Hello, world");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let client = GeminiClient::new(&GeminiConfig::default(), Some("  ".to_string()));
        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn test_missing_key_fails_per_call() {
        let client = GeminiClient::new(&GeminiConfig::default(), None);
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[tokio::test]
    async fn test_generate_against_mock() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "A review."}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config(&server.uri()), Some("test-key".to_string()));
        let text = client.generate("Review this").await.unwrap();
        assert_eq!(text, "A review.");
    }

    #[tokio::test]
    async fn test_error_status_is_generation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key invalid"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config(&server.uri()), Some("bad".to_string()));
        let err = client.generate("prompt").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("API key invalid"));
    }
}
