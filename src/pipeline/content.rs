//! Generated SEO content and LLM response unwrapping.

use crate::error::{Result, TubeSeoError};
use serde::{Deserialize, Serialize};

/// SEO companion content for a single video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoContent {
    /// Search-optimized title.
    pub title: String,
    /// Meta description.
    #[serde(default, alias = "metaDescription", alias = "meta_description")]
    pub description: String,
    /// Longer prose summary of the video.
    #[serde(default)]
    pub summary: String,
    #[serde(default, alias = "key_points")]
    pub key_points: Vec<String>,
    #[serde(default, alias = "faq")]
    pub faqs: Vec<Faq>,
    #[serde(default, alias = "keywords")]
    pub tags: Vec<String>,
}

/// A question and answer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl SeoContent {
    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);

        if !self.description.is_empty() {
            out.push_str(&format!("> {}\n\n", self.description));
        }

        if !self.summary.is_empty() {
            out.push_str("## Summary\n\n");
            out.push_str(self.summary.trim());
            out.push_str("\n\n");
        }

        if !self.key_points.is_empty() {
            out.push_str("## Key Points\n\n");
            for point in &self.key_points {
                out.push_str(&format!("- {}\n", point));
            }
            out.push('\n');
        }

        if !self.faqs.is_empty() {
            out.push_str("## FAQ\n\n");
            for faq in &self.faqs {
                out.push_str(&format!("### {}\n\n{}\n\n", faq.question, faq.answer));
            }
        }

        if !self.tags.is_empty() {
            out.push_str(&format!("**Tags:** {}\n", self.tags.join(", ")));
        }

        out
    }
}

/// Strip a Markdown code fence wrapping the whole response, if any.
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string ("json", "text", ...) on the opening line.
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

/// Unwrap a plain-text completion.
pub fn unwrap_text(response: &str) -> Result<String> {
    let text = strip_code_fence(response);
    if text.is_empty() {
        return Err(TubeSeoError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Parse SEO content from a completion that should contain a JSON object.
///
/// Prose or fences around the object are skipped, including prose that
/// itself contains braces.
pub fn parse_content(response: &str) -> Result<SeoContent> {
    let mut first_error = None;
    let mut parsed = None;

    for (start, _) in response.match_indices('{') {
        let mut stream =
            serde_json::Deserializer::from_str(&response[start..]).into_iter::<SeoContent>();
        match stream.next() {
            Some(Ok(content)) => {
                parsed = Some(content);
                break;
            }
            Some(Err(e)) => {
                first_error.get_or_insert_with(|| e.to_string());
            }
            None => {}
        }
    }

    let content = parsed.ok_or_else(|| {
        TubeSeoError::MalformedContent(format!(
            "{}. Response was: {}",
            first_error.unwrap_or_else(|| "no JSON object found".to_string()),
            response.chars().take(500).collect::<String>()
        ))
    })?;

    if content.title.trim().is_empty() {
        return Err(TubeSeoError::MalformedContent(
            "Generated content has no title".to_string(),
        ));
    }

    Ok(content)
}
