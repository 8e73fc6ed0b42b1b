//! Anthropic messages API backend.

use super::{ChatProvider, CompletionRequest};
use crate::error::{Result, TubeSeoError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Chat completions via the Anthropic messages API.
pub struct AnthropicProvider {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, model: &str, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(TubeSeoError::Config(
                "ANTHROPIC_API_KEY not set. Set it with: export ANTHROPIC_API_KEY='sk-ant-...'"
                    .to_string(),
            ));
        }

        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            api_key,
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        // No native JSON mode: the prompt itself asks for a JSON object.
        serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "system": request.system,
            "messages": [
                { "role": "user", "content": request.user },
            ],
        })
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.kind == "text")
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let resp = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.request_body(request))
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to reach Anthropic API"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TubeSeoError::Provider { status, message });
        }

        let body: MessagesResponse = resp.json().await?;
        let text = body.text();
        if text.trim().is_empty() {
            return Err(TubeSeoError::EmptyResponse);
        }

        debug!("Anthropic returned {} characters", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = AnthropicProvider::new("", "claude", Duration::from_secs(5));
        assert!(matches!(result, Err(TubeSeoError::Config(_))));
    }

    #[test]
    fn test_request_body() {
        let provider = AnthropicProvider::new("key", "claude-test", Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:9999/");
        assert_eq!(provider.base_url, "http://localhost:9999");

        let body = provider.request_body(
            &CompletionRequest::new("be terse", "hello").with_max_tokens(42),
        );
        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["max_tokens"], 42);
        assert_eq!(body["system"], "be terse");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_response_text_joins_text_blocks() {
        let body: MessagesResponse = serde_json::from_str(
            r#"{
                "id": "msg_1",
                "content": [
                    {"type": "text", "text": "Hello, "},
                    {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                    {"type": "text", "text": "world"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.text(), "Hello, world");
    }
}
