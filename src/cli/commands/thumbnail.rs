//! Thumbnail command.

use crate::youtube::{extract_video_id, thumbnail_url, ThumbnailQuality};
use anyhow::{anyhow, Result};

pub fn run_thumbnail(url: &str, quality: ThumbnailQuality) -> Result<()> {
    println!("{}", thumbnail_for(url, quality)?);
    Ok(())
}

fn thumbnail_for(url: &str, quality: ThumbnailQuality) -> Result<String> {
    let video_id =
        extract_video_id(url).ok_or_else(|| anyhow!("Not a YouTube video URL or ID: {}", url))?;
    Ok(thumbnail_url(&video_id, quality))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_for() {
        assert_eq!(
            thumbnail_for("https://youtu.be/dQw4w9WgXcQ", ThumbnailQuality::Medium).unwrap(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
        );
    }

    #[test]
    fn test_invalid_url_error_carries_input() {
        let err = thumbnail_for("https://vimeo.com/1", ThumbnailQuality::High).unwrap_err();
        assert_eq!(err.to_string(), "Not a YouTube video URL or ID: https://vimeo.com/1");
    }
}
