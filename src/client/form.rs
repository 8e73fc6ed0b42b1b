//! Form state and the clean → generate sequence.

use super::RelayClient;
use crate::error::{Result, TubeSeoError};
use crate::pipeline::SeoContent;
use crate::youtube::{extract_video_id, thumbnail_url, watch_url, ThumbnailQuality};
use serde::Serialize;
use tracing::info;

/// Values the user submits.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub url: String,
    pub transcript: String,
    pub video_title: Option<String>,
}

impl FormInput {
    /// Validate the form and return the video id.
    pub fn validate(&self) -> Result<String> {
        let video_id = extract_video_id(&self.url).ok_or_else(|| {
            TubeSeoError::InvalidInput("Please enter a valid YouTube URL".to_string())
        })?;

        if self.transcript.trim().is_empty() {
            return Err(TubeSeoError::InvalidInput(
                "Please paste the video transcript".to_string(),
            ));
        }

        Ok(video_id)
    }
}

/// Progress steps shown while a form is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    Validating,
    Cleaning,
    Generating,
    Done,
}

impl FormStep {
    /// Position in the sequence, starting at 0.
    pub fn index(&self) -> u64 {
        match self {
            FormStep::Validating => 0,
            FormStep::Cleaning => 1,
            FormStep::Generating => 2,
            FormStep::Done => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormStep::Validating => "Validating input",
            FormStep::Cleaning => "Cleaning transcript",
            FormStep::Generating => "Generating SEO content",
            FormStep::Done => "Done",
        }
    }
}

/// Receives progress updates.
pub trait ProgressReporter {
    fn step(&self, step: FormStep);
}

/// Everything the form produced for one video.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedVideo {
    pub video_id: String,
    pub watch_url: String,
    pub thumbnail_url: String,
    pub cleaned_transcript: String,
    pub content: SeoContent,
}

/// Validate the form, then clean and generate in sequence.
///
/// Generation runs on the cleaned transcript and is skipped when cleaning fails.
pub async fn run_form(
    client: &RelayClient,
    input: &FormInput,
    progress: &dyn ProgressReporter,
) -> Result<ProcessedVideo> {
    progress.step(FormStep::Validating);
    let video_id = input.validate()?;

    progress.step(FormStep::Cleaning);
    let cleaned_transcript = client.clean(&input.transcript).await?;
    info!(%video_id, "Transcript cleaned");

    progress.step(FormStep::Generating);
    let content = client
        .generate(&cleaned_transcript, input.video_title.as_deref())
        .await?;
    info!(%video_id, title = %content.title, "SEO content generated");

    progress.step(FormStep::Done);

    Ok(ProcessedVideo {
        watch_url: watch_url(&video_id),
        thumbnail_url: thumbnail_url(&video_id, ThumbnailQuality::default()),
        video_id,
        cleaned_transcript,
        content,
    })
}
