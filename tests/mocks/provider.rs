use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tubeseo::llm::{ChatProvider, CompletionRequest};
use tubeseo::TubeSeoError;

/// Answers cleanup calls with `cleaned` and JSON-mode calls with `content`.
#[derive(Clone)]
pub struct MockProvider {
    pub cleaned: Option<String>,
    pub content: String,
    pub calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn new(cleaned: &str, content: &str) -> Self {
        Self {
            cleaned: Some(cleaned.to_string()),
            content: content.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_clean(content: &str) -> Self {
        Self {
            cleaned: None,
            content: content.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-1"
    }

    async fn complete(&self, request: &CompletionRequest) -> tubeseo::Result<String> {
        self.calls.lock().unwrap().push(request.clone());

        if request.json {
            return Ok(self.content.clone());
        }

        self.cleaned.clone().ok_or(TubeSeoError::Provider {
            status: 500,
            message: "mock upstream failure".to_string(),
        })
    }
}
