//! Gemini API key lookup
//!
//! The key comes from `GEMINI_API_KEY` when set and non-blank, otherwise from
//! `[gemini] api_key` in `~/.config/cireview/secrets.toml`. That file lives
//! apart from `config.toml` and is refused unless it is owner-only (0600).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Generation service secrets
    pub gemini: GeminiSecrets,
}

/// Generation service secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiSecrets {
    /// Gemini API key
    pub api_key: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// A missing file yields empty secrets.
    pub fn load() -> Result<Self> {
        match Self::default_secrets_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load secrets from an owner-only file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        ensure_owner_only(path)?;

        let contents = std::fs::read_to_string(path)?;
        let secrets: Secrets = toml::from_str(&contents).map_err(|e| {
            Error::Config(format!("Failed to parse secrets {}: {}", path.display(), e))
        })?;

        Ok(Self {
            gemini: GeminiSecrets {
                api_key: secrets.gemini.api_key.as_deref().and_then(non_blank),
            },
        })
    }

    /// Returns `~/.config/cireview/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cireview").join("secrets.toml"))
    }

    /// Resolve the Gemini API key
    ///
    /// Priority: GEMINI_API_KEY env var > secrets file
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Resolve the API key given an explicit environment value
    pub fn gemini_api_key_with(&self, env_value: Option<String>) -> Option<String> {
        if let Some(key) = env_value.as_deref().and_then(non_blank) {
            debug!(source = API_KEY_ENV, "Resolved Gemini API key");
            return Some(key);
        }

        let key = self.gemini.api_key.as_deref().and_then(non_blank);
        if key.is_some() {
            debug!(source = "secrets file", "Resolved Gemini API key");
        }
        key
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Reject secrets files readable by group or others
#[cfg(unix)]
fn ensure_owner_only(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(Error::Config(format!(
            "Secrets file {} has insecure permissions {:o}; the API key must be owner-only \
             (chmod 600 {})",
            path.display(),
            mode,
            path.display()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn ensure_owner_only(_path: &Path) -> Result<()> {
    Ok(())
}
