//! YouTube URL handling.
//!
//! Video ids and thumbnail URLs are derived from the input string alone; no
//! request is made to YouTube.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use url::Url;

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex"))
}

fn is_video_id(candidate: &str) -> bool {
    video_id_regex().is_match(candidate)
}

/// Extract the video id from a YouTube URL or bare id.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if is_video_id(input) {
        return Some(input.to_string());
    }

    let url = if input.contains("://") {
        Url::parse(input).ok()?
    } else {
        Url::parse(&format!("https://{}", input)).ok()?
    };

    let host = url.host_str()?.to_lowercase();
    let host = ["www.", "m.", "music."]
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .unwrap_or(host.as_str());

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("embed" | "v" | "shorts" | "live") => segments.next().map(str::to_string),
            _ => None,
        },
        _ => None,
    }?;

    is_video_id(&candidate).then_some(candidate)
}

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Thumbnail sizes served by img.youtube.com.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailQuality {
    /// 120x90
    Default,
    /// 320x180
    Medium,
    /// 480x360
    #[default]
    High,
    /// 640x480
    Standard,
    /// 1280x720, not generated for every video
    Maxres,
}

impl ThumbnailQuality {
    fn file_name(&self) -> &'static str {
        match self {
            ThumbnailQuality::Default => "default",
            ThumbnailQuality::Medium => "mqdefault",
            ThumbnailQuality::High => "hqdefault",
            ThumbnailQuality::Standard => "sddefault",
            ThumbnailQuality::Maxres => "maxresdefault",
        }
    }
}

/// Thumbnail image URL for a video id.
pub fn thumbnail_url(video_id: &str, quality: ThumbnailQuality) -> String {
    format!(
        "https://img.youtube.com/vi/{}/{}.jpg",
        video_id,
        quality.file_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let id = Some("dQw4w9WgXcQ".to_string());

        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://www.youtube.com/live/dQw4w9WgXcQ?si=abc"), id);
        assert_eq!(extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://music.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42s"),
            id
        );
        assert_eq!(extract_video_id("youtu.be/dQw4w9WgXcQ?t=10"), id);
        assert_eq!(extract_video_id("  dQw4w9WgXcQ \n"), id);
    }

    #[test]
    fn test_extract_video_id_invalid() {
        assert_eq!(extract_video_id("not-a-video-id"), None);
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://vimeo.com/dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/playlist?list=PLtest"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/@channel"), None);
    }

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(
            thumbnail_url("dQw4w9WgXcQ", ThumbnailQuality::High),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
        assert_eq!(
            thumbnail_url("dQw4w9WgXcQ", ThumbnailQuality::Maxres),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
        assert_eq!(ThumbnailQuality::default(), ThumbnailQuality::High);
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}
