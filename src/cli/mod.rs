//! CLI module for tubeseo.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::youtube::ThumbnailQuality;
use clap::{Parser, Subcommand};

/// tubeseo - Transcript cleanup and SEO content for videos
///
/// Runs an HTTP relay that forwards transcripts to an LLM, and a client that
/// drives it from the command line.
#[derive(Parser, Debug)]
#[command(name = "tubeseo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level from `-v` flags, or the configured level when none are given.
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbose {
            0 => configured,
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP relay service
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Clean a transcript and generate SEO content through the relay service
    Process {
        /// YouTube URL or video ID
        url: String,

        /// Transcript file, or "-" to read from stdin
        transcript: String,

        /// Video title to include in the generation prompt
        #[arg(short, long)]
        title: Option<String>,

        /// Relay service URL (defaults to client.server_url)
        #[arg(short, long, env = "TUBESEO_SERVER")]
        server: Option<String>,

        /// Directory to write the transcript, JSON, and Markdown results to
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the thumbnail URL for a YouTube video
    Thumbnail {
        /// YouTube URL or video ID
        url: String,

        /// Thumbnail size
        #[arg(short, long, value_enum, default_value_t = ThumbnailQuality::High)]
        quality: ThumbnailQuality,
    },

    /// Check configuration and relay availability
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
