//! Prompt templates for tubeseo.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"))
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    /// Prompts for transcript cleanup.
    pub cleanup: CleanupPrompts,
    /// Prompts for SEO content generation.
    pub content: ContentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for transcript cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupPrompts {
    pub system: String,
    pub user: String,
}

impl Default for CleanupPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert transcript editor. You receive raw, auto-generated video transcripts and return a clean, readable version of the same content.

Rules:
- Remove timestamps, speaker-less line numbers, and caption artifacts like [Music] or [Applause]
- Remove filler words ("um", "uh", "you know", "like") and false starts
- Fix punctuation, capitalization, and obvious transcription errors based on context
- Merge broken caption lines into full sentences and group them into paragraphs
- Never summarize, shorten the substance, or add content that was not spoken
- Keep the speaker's voice and terminology

Respond with the cleaned transcript text only, no preamble or commentary."#
                .to_string(),

            user: r#"Clean up the following video transcript.

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

/// Prompts for SEO content generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPrompts {
    pub system: String,
    pub user: String,
}

impl Default for ContentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an SEO content strategist who writes search-optimized companion content for online videos.

Given a video transcript, you produce:
- An engaging, keyword-rich title (under 70 characters)
- A meta description (under 160 characters)
- A summary of the video in 2-3 short paragraphs
- 3-7 key points covered in the video
- 5 frequently asked questions with concise answers drawn only from the transcript
- 5-10 relevant tags

Only use information present in the transcript. Always respond with a single valid JSON object and nothing else."#
                .to_string(),

            user: r#"Generate SEO content for this video.

Video Title: {{video_title}}

Transcript:
{{transcript}}

Respond with a JSON object using exactly these keys:
{
  "title": "SEO title",
  "description": "Meta description",
  "summary": "Summary paragraphs",
  "keyPoints": ["point one", "point two"],
  "faqs": [{"question": "Question?", "answer": "Answer."}],
  "tags": ["tag one", "tag two"]
}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let cleanup_path = custom_path.join("cleanup.toml");
            if cleanup_path.exists() {
                let content = std::fs::read_to_string(&cleanup_path)?;
                prompts.cleanup = toml::from_str(&content)?;
            }

            let content_path = custom_path.join("content.toml");
            if content_path.exists() {
                let content = std::fs::read_to_string(&content_path)?;
                prompts.content = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution is a single pass over the template, so placeholder-like
    /// text inside a value is inserted as-is.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
