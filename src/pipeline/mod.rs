//! Transcript-to-content pipeline.
//!
//! Both operations validate the transcript, render a prompt, make a single
//! completion call, and unwrap the result. Nothing is retried.

mod content;

pub use content::{parse_content, strip_code_fence, unwrap_text, Faq, SeoContent};

use crate::config::{Prompts, Settings};
use crate::error::{Result, TubeSeoError};
use crate::llm::{ChatProvider, CompletionRequest};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Placeholder used in the content prompt when no title is supplied.
const UNTITLED: &str = "(not provided)";

/// Limits and sampling parameters for pipeline calls.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_transcript_chars: usize,
    pub max_tokens: u32,
    pub clean_temperature: f32,
    pub generate_temperature: f32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl PipelineOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_transcript_chars: settings.server.max_transcript_chars,
            max_tokens: settings.llm.max_tokens,
            clean_temperature: settings.llm.clean_temperature,
            generate_temperature: settings.llm.generate_temperature,
        }
    }
}

/// Runs transcript cleanup and SEO generation against a chat backend.
pub struct ContentPipeline {
    provider: Arc<dyn ChatProvider>,
    prompts: Prompts,
    options: PipelineOptions,
}

impl ContentPipeline {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            prompts: Prompts::default(),
            options: PipelineOptions::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }

    pub fn max_transcript_chars(&self) -> usize {
        self.options.max_transcript_chars
    }

    /// Reject blank or oversized transcripts.
    pub fn validate_transcript(&self, transcript: &str) -> Result<()> {
        if transcript.trim().is_empty() {
            return Err(TubeSeoError::InvalidInput("Transcript is required".to_string()));
        }

        let length = transcript.chars().count();
        if length > self.options.max_transcript_chars {
            return Err(TubeSeoError::TranscriptTooLong {
                length,
                limit: self.options.max_transcript_chars,
            });
        }

        Ok(())
    }

    /// Clean up a raw transcript.
    #[instrument(skip(self, transcript), fields(chars = transcript.len()))]
    pub async fn clean_transcript(&self, transcript: &str) -> Result<String> {
        self.validate_transcript(transcript)?;

        let vars = HashMap::from([("transcript".to_string(), transcript.trim().to_string())]);
        let request = CompletionRequest::new(
            self.prompts.render_with_custom(&self.prompts.cleanup.system, &vars),
            self.prompts.render_with_custom(&self.prompts.cleanup.user, &vars),
        )
        .with_temperature(self.options.clean_temperature)
        .with_max_tokens(self.options.max_tokens);

        info!("Cleaning transcript with {}", self.provider.model());
        let response = self.provider.complete(&request).await?;
        let cleaned = unwrap_text(&response)?;

        debug!("Cleaned transcript: {} -> {} chars", transcript.len(), cleaned.len());
        Ok(cleaned)
    }

    /// Generate SEO content for a transcript.
    #[instrument(skip(self, transcript), fields(chars = transcript.len()))]
    pub async fn generate_content(
        &self,
        transcript: &str,
        video_title: Option<&str>,
    ) -> Result<SeoContent> {
        self.validate_transcript(transcript)?;

        let title = video_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED);

        let vars = HashMap::from([
            ("transcript".to_string(), transcript.trim().to_string()),
            ("video_title".to_string(), title.to_string()),
        ]);
        let request = CompletionRequest::new(
            self.prompts.render_with_custom(&self.prompts.content.system, &vars),
            self.prompts.render_with_custom(&self.prompts.content.user, &vars),
        )
        .with_temperature(self.options.generate_temperature)
        .with_max_tokens(self.options.max_tokens)
        .json();

        info!("Generating SEO content with {}", self.provider.model());
        let response = self.provider.complete(&request).await?;
        let content = parse_content(&response)?;

        debug!(
            "Generated content: {} key points, {} FAQs, {} tags",
            content.key_points.len(),
            content.faqs.len(),
            content.tags.len()
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that returns a canned response and records requests.
    struct ScriptedProvider {
        response: std::result::Result<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn ok(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(response.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(msg.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            self.response
                .clone()
                .map_err(|message| TubeSeoError::Provider { status: 503, message })
        }
    }

    #[tokio::test]
    async fn test_clean_transcript() {
        let provider = ScriptedProvider::ok("```\nHello and welcome.\n```");
        let pipeline = ContentPipeline::new(provider.clone());

        let cleaned = pipeline.clean_transcript("  um hello uh and welcome  ").await.unwrap();
        assert_eq!(cleaned, "Hello and welcome.");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].user.contains("um hello uh and welcome"));
        assert!(!requests[0].user.contains("{{transcript}}"));
        assert!(!requests[0].json);
        assert_eq!(requests[0].temperature, 0.2);
    }

    #[tokio::test]
    async fn test_blank_transcript_never_calls_provider() {
        let provider = ScriptedProvider::ok("unused");
        let pipeline = ContentPipeline::new(provider.clone());

        let err = pipeline.clean_transcript(" \n\t ").await.unwrap_err();
        assert!(matches!(err, TubeSeoError::InvalidInput(_)));

        let err = pipeline.generate_content("", Some("Title")).await.unwrap_err();
        assert!(matches!(err, TubeSeoError::InvalidInput(_)));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transcript_limit_counts_chars() {
        let provider = ScriptedProvider::ok("ok");
        let pipeline = ContentPipeline::new(provider.clone()).with_options(PipelineOptions {
            max_transcript_chars: 5,
            ..PipelineOptions::default()
        });

        // Five multi-byte characters fit.
        assert!(pipeline.validate_transcript("ééééé").is_ok());
        let err = pipeline.clean_transcript("abcdef").await.unwrap_err();
        assert!(matches!(
            err,
            TubeSeoError::TranscriptTooLong { length: 6, limit: 5 }
        ));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generate_content_with_title() {
        let provider = ScriptedProvider::ok(
            r#"{"title": "SEO Title", "description": "Desc", "faqs": [{"question": "Q", "answer": "A"}]}"#,
        );
        let pipeline = ContentPipeline::new(provider.clone());

        let content = pipeline
            .generate_content("the transcript", Some("  My Video  "))
            .await
            .unwrap();
        assert_eq!(content.title, "SEO Title");
        assert_eq!(content.faqs.len(), 1);

        let requests = provider.requests();
        assert!(requests[0].json);
        assert!(requests[0].user.contains("Video Title: My Video\n"));
        assert!(requests[0].user.contains("the transcript"));
    }

    #[tokio::test]
    async fn test_transcript_placeholders_pass_through() {
        let provider = ScriptedProvider::ok(r#"{"title": "T"}"#);
        let pipeline = ContentPipeline::new(provider.clone());

        for _ in 0..20 {
            pipeline
                .generate_content("say {{video_title}} here", Some("SECRET"))
                .await
                .unwrap();
        }

        for request in provider.requests() {
            assert!(request.user.contains("say {{video_title}} here"));
            assert!(request.user.contains("Video Title: SECRET\n"));
        }
    }

    #[tokio::test]
    async fn test_generate_content_without_title() {
        let provider = ScriptedProvider::ok(r#"{"title": "T"}"#);
        let pipeline = ContentPipeline::new(provider.clone());

        pipeline.generate_content("text", Some("   ")).await.unwrap();
        pipeline.generate_content("text", None).await.unwrap();

        for request in provider.requests() {
            assert!(request.user.contains("Video Title: (not provided)"));
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_surfaced_once() {
        let provider = ScriptedProvider::failing("overloaded");
        let pipeline = ContentPipeline::new(provider.clone());

        let err = pipeline.generate_content("text", None).await.unwrap_err();
        assert!(matches!(err, TubeSeoError::Provider { status: 503, .. }));
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_content() {
        let provider = ScriptedProvider::ok("Sorry, I can't do that.");
        let pipeline = ContentPipeline::new(provider);

        let err = pipeline.generate_content("text", None).await.unwrap_err();
        assert!(matches!(err, TubeSeoError::MalformedContent(_)));
    }

    #[tokio::test]
    async fn test_custom_variables_reach_prompt() {
        let provider = ScriptedProvider::ok("clean");
        let mut prompts = Prompts::default();
        prompts.cleanup.user = "[{{brand}}] {{transcript}}".to_string();
        prompts.variables.insert("brand".to_string(), "Acme".to_string());

        let pipeline = ContentPipeline::new(provider.clone()).with_prompts(prompts);
        pipeline.clean_transcript("raw").await.unwrap();

        assert_eq!(provider.requests()[0].user, "[Acme] raw");
    }
}
