//! Configuration management for cireview
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (PORT, RETRY_LIMIT, GEMINI_MODEL, CIREVIEW_*)
//! 3. Config file (~/.config/cireview/config.toml)
//! 4. Default values
//!
//! The API key is not part of this structure; see [`crate::Secrets`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use humantime_serde::re::humantime::parse_duration;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default raw-content host used for README retrieval
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Default endpoint of the generation service
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3002 }
    }
}

/// Analysis agent configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Retry limit echoed in every report
    pub retry_limit: u32,

    /// Timeout for each README candidate request
    #[serde(with = "humantime_serde")]
    pub readme_timeout: Duration,

    /// Base URL of the raw-content host
    pub raw_base_url: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            retry_limit: 1,
            readme_timeout: Duration::from_secs(5),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
        }
    }
}

/// Generation service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model name
    pub model: String,

    /// API base URL
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Agent configuration
    pub agent: AgentConfig,

    /// Generation service configuration
    pub gemini: GeminiConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/cireview/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cireview").join("config.toml"))
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides using the given lookup
    ///
    /// Supported variables:
    /// - PORT: Listen port
    /// - RETRY_LIMIT: Retry limit echoed in reports
    /// - GEMINI_MODEL: Generation model
    /// - CIREVIEW_README_TIMEOUT: Per-candidate timeout (e.g. `5s`)
    /// - CIREVIEW_RAW_BASE_URL: Raw-content host
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }

        if let Some(limit) = lookup("RETRY_LIMIT") {
            self.agent.retry_limit = parse_env("RETRY_LIMIT", &limit)?;
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            let model = model.trim();
            if !model.is_empty() {
                self.gemini.model = model.to_string();
            }
        }

        if let Some(timeout) = lookup("CIREVIEW_README_TIMEOUT") {
            self.agent.readme_timeout = parse_duration(timeout.trim()).map_err(|e| {
                Error::Config(format!("Invalid CIREVIEW_README_TIMEOUT '{}': {}", timeout, e))
            })?;
        }

        if let Some(base) = lookup("CIREVIEW_RAW_BASE_URL") {
            self.agent.raw_base_url = base.trim().to_string();
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, port: Option<u16>, model: Option<String>) -> Self {
        if let Some(port) = port {
            self.server.port = port;
        }

        if let Some(m) = model {
            self.gemini.model = m;
        }

        self
    }

    /// Check that URL-valued settings parse
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("agent.raw_base_url", &self.agent.raw_base_url),
            ("gemini.base_url", &self.gemini.base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", name, value, e)))?;
        }
        Ok(())
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(port: Option<u16>, model: Option<String>) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(port, model);
        config.validate()?;
        Ok(config)
    }
}

fn parse_env<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", name, value, e)))
}
