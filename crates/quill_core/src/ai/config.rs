//! Explicit configuration for the AI commands.
//!
//! # Responsibility
//! - Carry the provider selector and per-provider credentials, models and
//!   endpoints as one plain struct the host passes in.
//! - Keep defaults aligned with the shipped settings of the commands.
//!
//! # Invariants
//! - Hosted providers require a non-empty credential before any request is
//!   issued; validation happens at client construction, not call time.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Selectable completion backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl ProviderKind {
    /// Stable string id used in persisted settings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }
}

/// Parses one provider selector from its persisted settings value.
pub fn parse_provider_kind(value: &str) -> Result<ProviderKind, ProviderKindError> {
    match value.trim() {
        "" => Err(ProviderKindError::Empty),
        "openai" => Ok(ProviderKind::OpenAi),
        "anthropic" => Ok(ProviderKind::Anthropic),
        "ollama" => Ok(ProviderKind::Ollama),
        other => Err(ProviderKindError::Unsupported(other.to_string())),
    }
}

/// Provider selector parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKindError {
    Empty,
    Unsupported(String),
}

impl Display for ProviderKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "ai provider value must not be empty"),
            Self::Unsupported(value) => write!(f, "ai provider is unsupported: {value}"),
        }
    }
}

impl Error for ProviderKindError {}

/// Full configuration for the AI commands.
///
/// All provider sections are always present so the host settings UI can
/// edit one while another is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: ProviderKind,
    pub openai: OpenAiConfig,
    pub anthropic: AnthropicConfig,
    pub ollama: OllamaConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            openai: OpenAiConfig::default(),
            anthropic: AnthropicConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

/// OpenAI chat-completions settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL; the `/v1/chat/completions` path is appended.
    pub endpoint: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com".to_string(),
        }
    }
}

/// Anthropic messages settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL; the `/v1/messages` path is appended.
    pub endpoint: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            endpoint: "https://api.anthropic.com".to_string(),
        }
    }
}

/// Local Ollama settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the local instance; the `/api/generate` path is appended.
    pub url: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: "llama2".to_string(),
        }
    }
}
