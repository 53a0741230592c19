//! Completion provider contract and dispatch client.
//!
//! # Responsibility
//! - Define the request/response contract shared by every provider adapter.
//! - Build one client bound to the configured provider and route
//!   completions through it.
//!
//! # Invariants
//! - Credential presence is checked at construction; `complete` never
//!   discovers a missing key mid-request.
//! - Log events carry metadata only (provider id, sizes, duration), never
//!   prompt text or credentials.

use crate::ai::anthropic::AnthropicProvider;
use crate::ai::config::{AiConfig, ProviderKind};
use crate::ai::ollama::OllamaProvider;
use crate::ai::openai::OpenAiProvider;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// One completion call: optional instruction plus the user text.
///
/// Adapters whose wire format has no instruction slot fold `system` into
/// the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(system: Option<String>, prompt: impl Into<String>) -> Self {
        Self {
            system,
            prompt: prompt.into(),
        }
    }

    /// Single-string rendering for wire formats without a system slot.
    pub fn folded_prompt(&self) -> String {
        match &self.system {
            Some(system) => format!("{system}\n\n{}", self.prompt),
            None => self.prompt.clone(),
        }
    }
}

/// Adapter contract for one remote completion backend.
pub trait CompletionProvider {
    /// Stable provider id used in settings and diagnostics.
    fn provider_id(&self) -> &'static str;

    /// Executes one blocking completion round trip.
    fn complete(
        &self,
        http: &reqwest::blocking::Client,
        request: &CompletionRequest,
    ) -> Result<String, AiError>;
}

/// Completion client bound to the configured provider.
pub struct AiClient {
    http: reqwest::blocking::Client,
    provider: Box<dyn CompletionProvider>,
}

impl AiClient {
    /// Builds a client for the provider selected in `config`.
    ///
    /// # Errors
    /// - [`AiError::MissingCredential`] when the selected hosted provider
    ///   has no API key configured.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let provider: Box<dyn CompletionProvider> = match config.provider {
            ProviderKind::OpenAi => Box::new(OpenAiProvider::from_config(&config.openai)?),
            ProviderKind::Anthropic => {
                Box::new(AnthropicProvider::from_config(&config.anthropic)?)
            }
            ProviderKind::Ollama => Box::new(OllamaProvider::from_config(&config.ollama)),
        };
        Ok(Self {
            http: reqwest::blocking::Client::new(),
            provider,
        })
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.provider_id()
    }

    /// Runs one completion and returns the trimmed answer text.
    pub fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let started_at = Instant::now();
        info!(
            "event=ai_complete module=ai status=start provider={} prompt_chars={}",
            self.provider.provider_id(),
            request.prompt.chars().count()
        );
        match self.provider.complete(&self.http, request) {
            Ok(answer) => {
                info!(
                    "event=ai_complete module=ai status=ok provider={} duration_ms={} answer_chars={}",
                    self.provider.provider_id(),
                    started_at.elapsed().as_millis(),
                    answer.chars().count()
                );
                Ok(answer)
            }
            Err(err) => {
                error!(
                    "event=ai_complete module=ai status=error provider={} duration_ms={} error={err}",
                    self.provider.provider_id(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

/// Errors from provider configuration and completion round trips.
#[derive(Debug)]
pub enum AiError {
    /// Selected hosted provider has no API key configured.
    MissingCredential { provider: &'static str },
    /// Request never produced an HTTP response.
    Transport {
        provider: &'static str,
        source: reqwest::Error,
    },
    /// Endpoint answered with a non-success status.
    Status { provider: &'static str, status: u16 },
    /// Response body did not match the provider's documented shape.
    UnexpectedResponse {
        provider: &'static str,
        detail: String,
    },
    /// Provider answered with an empty completion.
    EmptyCompletion { provider: &'static str },
}

impl Display for AiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential { provider } => {
                write!(f, "{provider} API key not set; configure it in settings")
            }
            Self::Transport { provider, source } => {
                write!(f, "{provider} request failed: {source}")
            }
            Self::Status { provider, status } => {
                write!(f, "{provider} request failed with status {status}")
            }
            Self::UnexpectedResponse { provider, detail } => {
                write!(f, "{provider} returned an unexpected response: {detail}")
            }
            Self::EmptyCompletion { provider } => {
                write!(f, "{provider} returned an empty completion")
            }
        }
    }
}

impl Error for AiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Shared response epilogue: trim and reject empty completions.
pub(crate) fn non_empty_answer(provider: &'static str, raw: String) -> Result<String, AiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AiError::EmptyCompletion { provider });
    }
    Ok(trimmed.to_string())
}

/// Shared status check before body decoding.
pub(crate) fn require_success(
    provider: &'static str,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, AiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AiError::Status {
            provider,
            status: status.as_u16(),
        });
    }
    Ok(response)
}
