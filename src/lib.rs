//! tubeseo - Transcript cleanup and SEO content for videos
//!
//! A thin relay between a transcript and an LLM provider. The provider does
//! all of the language work; this crate templates prompts, makes the call,
//! and unwraps the result.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `llm` - Chat-completion backends (OpenAI, Anthropic)
//! - `pipeline` - Transcript cleanup and SEO content generation
//! - `server` - HTTP relay service
//! - `client` - Form client that drives the relay
//! - `youtube` - Video id and thumbnail URL helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use tubeseo::config::Settings;
//! use tubeseo::llm::build_provider;
//! use tubeseo::pipeline::ContentPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = ContentPipeline::new(build_provider(&settings.llm)?);
//!
//!     let cleaned = pipeline.clean_transcript("um so today we uh talk about rust").await?;
//!     let content = pipeline.generate_content(&cleaned, Some("Rust in 10 minutes")).await?;
//!     println!("{}", content.title);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod server;
pub mod youtube;

pub use error::{Result, TubeSeoError};
