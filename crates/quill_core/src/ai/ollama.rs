//! Local Ollama generate adapter. No credential required.

use crate::ai::config::OllamaConfig;
use crate::ai::provider::{
    non_empty_answer, require_success, AiError, CompletionProvider, CompletionRequest,
};
use serde::{Deserialize, Serialize};

pub(crate) const PROVIDER_OLLAMA: &str = "ollama";

const GENERATE_PATH: &str = "/api/generate";

/// Adapter for a local generate endpoint.
pub struct OllamaProvider {
    url: String,
    model: String,
}

impl OllamaProvider {
    pub fn from_config(config: &OllamaConfig) -> Self {
        Self {
            url: config.url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl CompletionProvider for OllamaProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_OLLAMA
    }

    fn complete(
        &self,
        http: &reqwest::blocking::Client,
        request: &CompletionRequest,
    ) -> Result<String, AiError> {
        let prompt = request.folded_prompt();
        let response = http
            .post(format!("{}{GENERATE_PATH}", self.url))
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
            })
            .send()
            .map_err(|source| AiError::Transport {
                provider: PROVIDER_OLLAMA,
                source,
            })?;

        let body: GenerateResponse = require_success(PROVIDER_OLLAMA, response)?
            .json()
            .map_err(|err| AiError::UnexpectedResponse {
                provider: PROVIDER_OLLAMA,
                detail: err.to_string(),
            })?;

        non_empty_answer(PROVIDER_OLLAMA, body.response)
    }
}
