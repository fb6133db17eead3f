/// LLM Client: the single point of entry for all model provider calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Endpoints depend on the `CompletionClient` trait so a test double can stand in.
///
/// Each generation task is bound to one provider at configuration time:
/// hooks, angles and script go to Anthropic; captions go to OpenAI.
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod anthropic;
pub mod openai;
pub mod prompts;
#[cfg(test)]
pub mod stub;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("{0} is not set")]
    MissingCredential(&'static str),
}

/// A text-completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    /// Environment variable holding this provider's API key.
    pub fn credential_var(self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Anthropic => f.write_str("anthropic"),
            Provider::OpenAi => f.write_str("openai"),
        }
    }
}

/// Provider plus model name. Fixed per task at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelector {
    pub provider: Provider,
    pub model: String,
}

/// Sends a prompt to a completion service and returns the raw text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, model: &ModelSelector, prompt: &str) -> Result<String, LlmError>;
}

/// Production completion client. Routes each call to the provider named by the
/// selector. A provider whose key was absent at startup has no client and
/// answers with `LlmError::MissingCredential`.
#[derive(Clone)]
pub struct LlmClient {
    anthropic: Option<AnthropicClient>,
    openai: Option<OpenAiClient>,
}

impl LlmClient {
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(config.llm_timeout_secs);

        let anthropic = config
            .credential(Provider::Anthropic)
            .map(|key| AnthropicClient::new(key, &config.anthropic_base_url, timeout))
            .transpose()?;
        let openai = config
            .credential(Provider::OpenAi)
            .map(|key| OpenAiClient::new(key, &config.openai_base_url, timeout))
            .transpose()?;

        Ok(Self { anthropic, openai })
    }

    pub fn has_provider(&self, provider: Provider) -> bool {
        match provider {
            Provider::Anthropic => self.anthropic.is_some(),
            Provider::OpenAi => self.openai.is_some(),
        }
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, model: &ModelSelector, prompt: &str) -> Result<String, LlmError> {
        debug!(
            "Completion request: provider={} model={} prompt_chars={}",
            model.provider,
            model.model,
            prompt.len()
        );

        match model.provider {
            Provider::Anthropic => match &self.anthropic {
                Some(client) => client.complete(&model.model, prompt).await,
                None => Err(LlmError::MissingCredential(Provider::Anthropic.credential_var())),
            },
            Provider::OpenAi => match &self.openai {
                Some(client) => client.complete(&model.model, prompt).await,
                None => Err(LlmError::MissingCredential(Provider::OpenAi.credential_var())),
            },
        }
    }
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
