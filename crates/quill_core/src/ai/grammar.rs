//! Grammar correction command.
//!
//! # Responsibility
//! - Build the copy-editor instruction and route editor text through the
//!   configured provider.
//!
//! # Invariants
//! - Blank input never reaches the provider.
//! - An empty completion is an error; the caller never replaces text with
//!   nothing.

use crate::ai::provider::{AiClient, AiError, CompletionRequest};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Instruction sent with every correction request.
pub const COPY_EDITOR_PROMPT: &str = "You are a professional copy editor. Correct grammar, \
spelling, and punctuation errors while preserving the original meaning and style. Return only \
the corrected text without any explanations or comments.";

/// Corrects grammar, spelling and punctuation in `text`.
///
/// The caller decides what `text` is (selection or whole note) and what to
/// do with the corrected result.
pub fn correct(client: &AiClient, text: &str) -> Result<String, GrammarError> {
    if text.trim().is_empty() {
        return Err(GrammarError::EmptyInput);
    }
    let request = CompletionRequest::new(Some(COPY_EDITOR_PROMPT.to_string()), text);
    client.complete(&request).map_err(GrammarError::Ai)
}

/// Grammar command errors.
#[derive(Debug)]
pub enum GrammarError {
    /// No text to correct.
    EmptyInput,
    Ai(AiError),
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no text to correct"),
            Self::Ai(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GrammarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyInput => None,
            Self::Ai(err) => Some(err),
        }
    }
}

impl From<AiError> for GrammarError {
    fn from(value: AiError) -> Self {
        Self::Ai(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{correct, GrammarError};
    use crate::ai::config::{AiConfig, ProviderKind};
    use crate::ai::provider::AiClient;

    fn ollama_client() -> AiClient {
        let mut config = AiConfig::default();
        config.provider = ProviderKind::Ollama;
        AiClient::from_config(&config).unwrap()
    }

    #[test]
    fn blank_input_is_rejected_before_any_request() {
        let client = ollama_client();
        let err = correct(&client, "   \n").expect_err("blank input must fail");
        assert!(matches!(err, GrammarError::EmptyInput));
    }
}
