//! Process command: the form client.

use crate::cli::Output;
use crate::client::{request_timeout, run_form, write_outputs, FormInput, RelayClient};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::io::Read;

/// Run the process command.
pub async fn run_process(
    url: &str,
    transcript_path: &str,
    title: Option<String>,
    server: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    let transcript = read_transcript(transcript_path)?;

    let server = server.unwrap_or_else(|| settings.client.server_url.clone());
    let client = RelayClient::new(server, request_timeout(settings.llm.timeout_seconds))?;

    let input = FormInput {
        url: url.to_string(),
        transcript,
        video_title: title,
    };

    let progress = Output::step_bar();
    let result = run_form(&client, &input, &progress).await;
    progress.finish();

    let video = match result {
        Ok(video) => video,
        Err(e) => {
            if matches!(e, crate::TubeSeoError::Http(_)) {
                Output::info(&format!(
                    "Is the relay running at {}? Start it with 'tubeseo serve'.",
                    client.base_url()
                ));
            }
            return Err(e.into());
        }
    };

    Output::header("Video");
    Output::kv("ID", &video.video_id);
    Output::kv("URL", &video.watch_url);
    Output::kv("Thumbnail", &video.thumbnail_url);

    Output::header("Cleaned Transcript");
    println!("{}", video.cleaned_transcript);

    Output::seo_content(&video.content);
    println!();

    let output_dir = output
        .map(|o| Settings::expand_path(&o))
        .or_else(|| settings.output_dir());

    if let Some(dir) = output_dir {
        let files = write_outputs(&dir, &video)?;
        Output::success("Saved results:");
        Output::list_item(&files.transcript.display().to_string());
        Output::list_item(&files.json.display().to_string());
        Output::list_item(&files.markdown.display().to_string());
    }

    Ok(())
}

fn read_transcript(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read transcript from stdin")?;
        return Ok(buf);
    }

    let path = Settings::expand_path(path);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read transcript from {}", path.display()))
}
