//! Writing form results to files.

use super::ProcessedVideo;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Paths written by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub transcript: PathBuf,
    pub json: PathBuf,
    pub markdown: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    video: &'a ProcessedVideo,
}

/// Write the cleaned transcript, a JSON export, and a Markdown rendering into `dir`.
pub fn write_outputs(dir: &Path, video: &ProcessedVideo) -> Result<ExportedFiles> {
    std::fs::create_dir_all(dir)?;

    let files = ExportedFiles {
        transcript: dir.join(format!("{}-transcript.txt", video.video_id)),
        json: dir.join(format!("{}-seo.json", video.video_id)),
        markdown: dir.join(format!("{}-seo.md", video.video_id)),
    };

    std::fs::write(&files.transcript, &video.cleaned_transcript)?;

    let export = Export {
        generated_at: Utc::now(),
        video,
    };
    std::fs::write(&files.json, serde_json::to_string_pretty(&export)?)?;

    let mut markdown = format!(
        "![thumbnail]({})\n\n[Watch on YouTube]({})\n\n",
        video.thumbnail_url, video.watch_url
    );
    markdown.push_str(&video.content.to_markdown());
    std::fs::write(&files.markdown, markdown)?;

    Ok(files)
}
