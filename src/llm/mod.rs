//! Chat-completion backends.
//!
//! Every backend performs exactly one outbound request per call. Failures are
//! returned to the caller as-is.

mod anthropic;
mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::{create_client_with_timeout, OpenAIProvider};

use crate::config::{LlmProvider, LlmSettings};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A single system + user prompt exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the backend for a JSON object response where supported.
    pub json: bool,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.7,
            max_tokens: 4096,
            json: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Model the backend sends requests to.
    fn model(&self) -> &str;

    /// Send the request and return the assistant's text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Build the backend selected in settings.
pub fn build_provider(settings: &LlmSettings) -> Result<Arc<dyn ChatProvider>> {
    let timeout = Duration::from_secs(settings.timeout_seconds);

    let provider: Arc<dyn ChatProvider> = match settings.provider {
        LlmProvider::OpenAI => Arc::new(OpenAIProvider::new(
            &settings.openai_model,
            settings.api_base.as_deref(),
            timeout,
        )?),
        LlmProvider::Anthropic => {
            let api_key = std::env::var(LlmProvider::Anthropic.api_key_var()).unwrap_or_default();
            let mut provider =
                AnthropicProvider::new(api_key, &settings.anthropic_model, timeout)?;
            if let Some(base) = &settings.api_base {
                provider = provider.with_base_url(base);
            }
            Arc::new(provider)
        }
    };

    Ok(provider)
}
