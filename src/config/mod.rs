//! Configuration module for tubeseo.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{CleanupPrompts, ContentPrompts, Prompts};
pub use settings::{
    ClientSettings, GeneralSettings, LlmProvider, LlmSettings, PromptSettings, ServerSettings,
    Settings,
};
