//! Anthropic messages adapter.
//!
//! The messages wire format here carries no separate system slot; the
//! instruction is folded into the single user message, matching how the
//! commands historically prompted this provider.

use crate::ai::config::AnthropicConfig;
use crate::ai::provider::{
    non_empty_answer, require_success, AiError, CompletionProvider, CompletionRequest,
};
use serde::{Deserialize, Serialize};

pub(crate) const PROVIDER_ANTHROPIC: &str = "anthropic";

const MESSAGES_PATH: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Adapter for the messages endpoint.
pub struct AnthropicProvider {
    endpoint: String,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    /// Builds the adapter, requiring a configured API key.
    pub fn from_config(config: &AnthropicConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::MissingCredential {
                provider: PROVIDER_ANTHROPIC,
            });
        }
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

impl CompletionProvider for AnthropicProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_ANTHROPIC
    }

    fn complete(
        &self,
        http: &reqwest::blocking::Client,
        request: &CompletionRequest,
    ) -> Result<String, AiError> {
        let prompt = request.folded_prompt();
        let response = http
            .post(format!("{}{MESSAGES_PATH}", self.endpoint))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest {
                model: &self.model,
                max_tokens: MAX_TOKENS,
                messages: vec![UserMessage {
                    role: "user",
                    content: &prompt,
                }],
            })
            .send()
            .map_err(|source| AiError::Transport {
                provider: PROVIDER_ANTHROPIC,
                source,
            })?;

        let body: MessagesResponse = require_success(PROVIDER_ANTHROPIC, response)?
            .json()
            .map_err(|err| AiError::UnexpectedResponse {
                provider: PROVIDER_ANTHROPIC,
                detail: err.to_string(),
            })?;

        let text = body
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or(AiError::UnexpectedResponse {
                provider: PROVIDER_ANTHROPIC,
                detail: "content array is empty".to_string(),
            })?;

        non_empty_answer(PROVIDER_ANTHROPIC, text)
    }
}

#[cfg(test)]
mod tests {
    use super::AnthropicProvider;
    use crate::ai::config::AnthropicConfig;
    use crate::ai::provider::AiError;

    #[test]
    fn rejects_missing_api_key_at_construction() {
        let err = AnthropicProvider::from_config(&AnthropicConfig::default())
            .err()
            .expect("must fail");
        assert!(matches!(
            err,
            AiError::MissingCredential {
                provider: "anthropic"
            }
        ));
    }
}
