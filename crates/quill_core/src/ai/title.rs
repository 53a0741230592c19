//! Title generation and correction command.
//!
//! # Responsibility
//! - Prompt the provider for a new or corrected note title.
//! - Sanitize answers into safe file names before the host renames
//!   anything.
//!
//! # Invariants
//! - Only a bounded prefix of note content is sent to the provider.
//! - Sanitized titles never contain file-name-invalid characters and never
//!   exceed the length cap.

use crate::ai::provider::{AiClient, AiError, CompletionRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Content prefix length sent with a generation request, in characters.
const CONTENT_PROMPT_CHARS: usize = 2000;
/// Maximum sanitized title length, in characters.
const TITLE_MAX_CHARS: usize = 100;

static SURROUNDING_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^["']|["']$"#).expect("quote pattern is valid"));
static INVALID_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("filename pattern is valid"));

/// Outcome of a title correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleCorrection {
    /// The sanitized answer equals the current title.
    Unchanged,
    /// The title should be replaced with the contained value.
    Renamed(String),
}

/// Generates a title from note content. The answer is sanitized.
pub fn generate(client: &AiClient, content: &str) -> Result<String, TitleError> {
    if content.trim().is_empty() {
        return Err(TitleError::EmptyContent);
    }
    let prefix: String = content.chars().take(CONTENT_PROMPT_CHARS).collect();
    let request = CompletionRequest::new(
        None,
        format!(
            "Based on the following note content, generate a concise, descriptive title (just \
             the title, no quotes or extra text):\n\n{prefix}"
        ),
    );
    let answer = client.complete(&request)?;
    Ok(sanitize(&answer))
}

/// Corrects typos in an existing title, reporting whether it changed.
pub fn correct(client: &AiClient, current_title: &str) -> Result<TitleCorrection, TitleError> {
    if current_title.trim().is_empty() {
        return Err(TitleError::EmptyContent);
    }
    let request = CompletionRequest::new(
        None,
        format!(
            "Correct any typos and formatting issues in this title, keeping the same meaning. \
             Return only the corrected title:\n\n{current_title}"
        ),
    );
    let answer = client.complete(&request)?;
    let sanitized = sanitize(&answer);
    if sanitized == current_title {
        Ok(TitleCorrection::Unchanged)
    } else {
        Ok(TitleCorrection::Renamed(sanitized))
    }
}

/// Turns a provider answer into a safe file-name title.
///
/// Strips one layer of surrounding quotes, replaces file-name-invalid
/// characters with `-`, and caps the length.
pub fn sanitize(title: &str) -> String {
    let trimmed = title.trim();
    let unquoted = SURROUNDING_QUOTES.replace_all(trimmed, "");
    let cleaned = INVALID_FILENAME_CHARS.replace_all(&unquoted, "-");
    cleaned.chars().take(TITLE_MAX_CHARS).collect()
}

/// Title command errors.
#[derive(Debug)]
pub enum TitleError {
    /// Note content or current title is blank.
    EmptyContent,
    Ai(AiError),
}

impl Display for TitleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note has no content to work with"),
            Self::Ai(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TitleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyContent => None,
            Self::Ai(err) => Some(err),
        }
    }
}

impl From<AiError> for TitleError {
    fn from(value: AiError) -> Self {
        Self::Ai(value)
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize;

    #[test]
    fn strips_surrounding_quotes() {
        assert_eq!(sanitize(r#""Meeting Notes""#), "Meeting Notes");
        assert_eq!(sanitize("'Meeting Notes'"), "Meeting Notes");
        // Interior quotes are file-name-invalid, not surrounding.
        assert_eq!(sanitize(r#"Say "hi" twice"#), "Say -hi- twice");
    }

    #[test]
    fn replaces_invalid_filename_characters() {
        assert_eq!(sanitize("plan: a/b?"), "plan- a-b-");
        assert_eq!(sanitize(r"back\slash|pipe"), "back-slash-pipe");
    }

    #[test]
    fn caps_length_at_one_hundred_chars() {
        let long = "x".repeat(250);
        assert_eq!(sanitize(&long).chars().count(), 100);
    }

    #[test]
    fn trims_whitespace_before_sanitizing() {
        assert_eq!(sanitize("  Weekly Plan \n"), "Weekly Plan");
    }
}
