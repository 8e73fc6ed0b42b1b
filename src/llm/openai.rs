//! OpenAI chat-completion backend.

use super::{ChatProvider, CompletionRequest};
use crate::error::{Result, TubeSeoError};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Create an OpenAI client with a custom timeout and optional API base.
///
/// The API key is read from `OPENAI_API_KEY`.
pub fn create_client_with_timeout(
    timeout: Duration,
    api_base: Option<&str>,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let mut config = OpenAIConfig::default();
    if let Some(base) = api_base {
        config = config.with_api_base(base);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Chat completions via the OpenAI API.
pub struct OpenAIProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIProvider {
    pub fn new(model: &str, api_base: Option<&str>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(timeout, api_base)?,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model, json = request.json))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(|e| TubeSeoError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(|e| TubeSeoError::OpenAI(e.to_string()))?
                .into(),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_tokens);
        if request.json {
            args.response_format(ResponseFormat::JsonObject);
        }
        let chat_request = args
            .build()
            .map_err(|e| TubeSeoError::OpenAI(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| TubeSeoError::OpenAI(format!("Chat completion failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|c| !c.trim().is_empty())
            .ok_or(TubeSeoError::EmptyResponse)?
            .clone();

        debug!("OpenAI returned {} characters", content.len());

        Ok(content)
    }
}
