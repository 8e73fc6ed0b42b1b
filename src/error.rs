//! Error types for tubeseo.

use thiserror::Error;

/// Library-level error type for tubeseo operations.
#[derive(Error, Debug)]
pub enum TubeSeoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcript is too long ({length} characters, limit is {limit})")]
    TranscriptTooLong { length: usize, limit: usize },

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("LLM provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Empty response from LLM")]
    EmptyResponse,

    #[error("Malformed content from LLM: {0}")]
    MalformedContent(String),

    #[error("Relay service returned {status}: {message}")]
    Relay { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for tubeseo operations.
pub type Result<T> = std::result::Result<T, TubeSeoError>;
