//! OpenAI chat-completions adapter.

use crate::ai::config::OpenAiConfig;
use crate::ai::provider::{
    non_empty_answer, require_success, AiError, CompletionProvider, CompletionRequest,
};
use serde::{Deserialize, Serialize};

pub(crate) const PROVIDER_OPENAI: &str = "openai";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const TEMPERATURE: f32 = 0.3;

/// Adapter for the chat-completions endpoint.
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// Builds the adapter, requiring a configured API key.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::MissingCredential {
                provider: PROVIDER_OPENAI,
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
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl CompletionProvider for OpenAiProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_OPENAI
    }

    fn complete(
        &self,
        http: &reqwest::blocking::Client,
        request: &CompletionRequest,
    ) -> Result<String, AiError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let response = http
            .post(format!("{}{CHAT_COMPLETIONS_PATH}", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
                temperature: TEMPERATURE,
            })
            .send()
            .map_err(|source| AiError::Transport {
                provider: PROVIDER_OPENAI,
                source,
            })?;

        let body: ChatResponse = require_success(PROVIDER_OPENAI, response)?
            .json()
            .map_err(|err| AiError::UnexpectedResponse {
                provider: PROVIDER_OPENAI,
                detail: err.to_string(),
            })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AiError::UnexpectedResponse {
                provider: PROVIDER_OPENAI,
                detail: "choices array is empty".to_string(),
            })?;

        non_empty_answer(PROVIDER_OPENAI, content)
    }
}

#[cfg(test)]
mod tests {
    use super::OpenAiProvider;
    use crate::ai::config::OpenAiConfig;
    use crate::ai::provider::AiError;

    #[test]
    fn rejects_missing_api_key_at_construction() {
        let config = OpenAiConfig::default();
        let err = OpenAiProvider::from_config(&config).err().expect("must fail");
        assert!(matches!(err, AiError::MissingCredential { provider: "openai" }));
    }

    #[test]
    fn trims_trailing_slash_from_endpoint() {
        let config = OpenAiConfig {
            api_key: "sk-test".to_string(),
            endpoint: "https://api.openai.com/".to_string(),
            ..OpenAiConfig::default()
        };
        let provider = OpenAiProvider::from_config(&config).unwrap();
        assert_eq!(provider.endpoint, "https://api.openai.com");
    }
}
