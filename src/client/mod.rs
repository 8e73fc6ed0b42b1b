//! Form client for the relay service.
//!
//! Collects a video URL and transcript, runs cleanup then generation against
//! the relay, and writes the results to disk.

mod export;
mod form;

pub use export::{write_outputs, ExportedFiles};
pub use form::{run_form, FormInput, FormStep, ProcessedVideo, ProgressReporter};

use crate::error::{Result, TubeSeoError};
use crate::pipeline::SeoContent;
use crate::server::{CleanResponse, ErrorResponse};
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Slack added on top of the relay's own LLM timeout.
const TIMEOUT_MARGIN_SECS: u64 = 30;

/// Per-request timeout for a relay whose LLM calls time out after `llm_timeout_secs`.
pub fn request_timeout(llm_timeout_secs: u64) -> Duration {
    Duration::from_secs(llm_timeout_secs.saturating_add(TIMEOUT_MARGIN_SECS))
}

/// HTTP client for the relay endpoints.
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CleanBody<'a> {
    transcript: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    transcript: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    video_title: Option<&'a str>,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the relay is up. Returns the health payload.
    pub async fn health(&self) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Ask the relay to clean a transcript.
    pub async fn clean(&self, transcript: &str) -> Result<String> {
        debug!("POST {}/api/clean-transcript", self.base_url);
        let resp = self
            .http
            .post(format!("{}/api/clean-transcript", self.base_url))
            .json(&CleanBody { transcript })
            .send()
            .await?;

        let body: CleanResponse = Self::check(resp).await?.json().await?;
        Ok(body.cleaned_transcript)
    }

    /// Ask the relay to generate SEO content.
    pub async fn generate(&self, transcript: &str, video_title: Option<&str>) -> Result<SeoContent> {
        debug!("POST {}/api/generate-content", self.base_url);
        let resp = self
            .http
            .post(format!("{}/api/generate-content", self.base_url))
            .json(&GenerateBody {
                transcript,
                video_title,
            })
            .send()
            .await?;

        Ok(Self::check(resp).await?.json().await?)
    }

    /// Turn a non-2xx response into a relay error carrying the server's message.
    async fn check(resp: Response) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or("Unknown error").to_string();
        let message = match resp.text().await {
            Ok(text) if !text.trim().is_empty() => serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text),
            Ok(_) => reason,
            Err(e) => {
                debug!("Failed to read relay error body: {}", e);
                reason
            }
        };

        Err(TubeSeoError::Relay {
            status: status.as_u16(),
            message,
        })
    }
}
