//! Analysis prompt template
//!
//! The template uses `{{VARIABLE}}` placeholders rendered with the repository
//! URL and a README snippet.

/// Embedded analysis prompt
const REPO_ANALYSIS_PROMPT: &str = include_str!("prompts/repo_analysis.md");

/// Maximum README characters included in the prompt
pub const README_SNIPPET_CHARS: usize = 8000;

/// Render the analysis prompt for a repository
///
/// The README is cut to [`README_SNIPPET_CHARS`] characters.
pub fn render_prompt(repo_url: &str, readme: &str) -> String {
    let snippet = truncate_chars(readme, README_SNIPPET_CHARS);
    REPO_ANALYSIS_PROMPT
        .replace("{{REPO}}", repo_url)
        .replace("{{README}}", snippet)
}

/// Return at most `max` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_repo_and_readme() {
        let prompt = render_prompt("https://github.com/owner/repo", "# Hello\nA project.");
        assert!(prompt.contains("Repository: https://github.com/owner/repo"));
        assert!(prompt.contains("# Hello\nA project."));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_render_without_readme() {
        let prompt = render_prompt("https://github.com/owner/repo", "");
        assert!(prompt.contains("----------------\n\n----------------"));
    }

    #[test]
    fn test_readme_is_truncated() {
        let readme = "a".repeat(README_SNIPPET_CHARS + 500);
        let prompt = render_prompt("u", &readme);
        assert!(prompt.contains(&"a".repeat(README_SNIPPET_CHARS)));
        assert!(!prompt.contains(&"a".repeat(README_SNIPPET_CHARS + 1)));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo🦀", 2), "hé");
        assert_eq!(truncate_chars("🦀🦀", 5), "🦀🦀");
        assert_eq!(truncate_chars("", 3), "");
    }
}
