//! Repository locator recognition
//!
//! Two surface syntaxes are accepted:
//! - `[http[s]://][www.]github.com/owner/repo[.git][/]`
//! - `git@github.com:owner/repo[.git]`
//!
//! The whole (trimmed) input must match. Literal parts are matched
//! case-insensitively; owner and repo are kept verbatim.

use std::fmt;

use crate::{Error, Result};

const HOST_PATH_PREFIX: &str = "github.com/";
const SSH_PREFIX: &str = "git@github.com:";

/// A recognized GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    owner: String,
    repo: String,
    canonical_url: String,
}

impl RepositoryReference {
    /// Recognize a repository locator
    ///
    /// Trailing `.git` suffixes are stripped from the repo name until none
    /// remain, so the name never ends in `.git`.
    pub fn recognize(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let not_recognized = || Error::NotRecognized(trimmed.to_string());

        let path = match strip_web_prefix(trimmed) {
            // Web form allows a single trailing slash
            Some(rest) => rest.strip_suffix('/').unwrap_or(rest),
            None => strip_prefix_ci(trimmed, SSH_PREFIX).ok_or_else(not_recognized)?,
        };

        let (owner, repo) = path.split_once('/').ok_or_else(not_recognized)?;
        if repo.contains('/') {
            return Err(not_recognized());
        }

        let repo = strip_git_suffixes(repo);
        if owner.is_empty() || repo.is_empty() {
            return Err(not_recognized());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            canonical_url: trimmed.to_string(),
        })
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The trimmed locator this reference was recognized from
    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }

    /// Browser URL of the repository
    pub fn web_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Strip `[http[s]://][www.]github.com/`, returning the path after it
fn strip_web_prefix(input: &str) -> Option<&str> {
    let rest = strip_prefix_ci(input, "https://")
        .or_else(|| strip_prefix_ci(input, "http://"))
        .unwrap_or(input);
    let rest = strip_prefix_ci(rest, "www.").unwrap_or(rest);
    strip_prefix_ci(rest, HOST_PATH_PREFIX)
}

fn strip_git_suffixes(mut name: &str) -> &str {
    while let Some(stripped) = strip_suffix_ci(name, ".git") {
        name = stripped;
    }
    name
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}
