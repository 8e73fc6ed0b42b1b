//! Config command: show, locate, or edit the settings file.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the config command against `config_path`, or the default location.
pub fn run_config(
    action: &ConfigAction,
    config_path: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let path = resolve_config_path(config_path);

    match action {
        ConfigAction::Show => {
            let rendered =
                toml::to_string_pretty(&settings).context("Failed to serialize settings")?;
            if !path.exists() {
                Output::info(&format!("{} does not exist, showing defaults", path.display()));
            }
            println!("{}", rendered);
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Edit => edit(&path, &settings)?,
    }

    Ok(())
}

fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path)
}

/// `$VISUAL`, then `$EDITOR`, then vim.
fn editor_command(visual: Option<String>, editor: Option<String>) -> String {
    [visual, editor]
        .into_iter()
        .flatten()
        .find(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vim".to_string())
}

fn edit(path: &PathBuf, settings: &Settings) -> Result<()> {
    if !path.exists() {
        settings.save_to(path)?;
        Output::info(&format!("Wrote default settings to {}", path.display()));
    }

    let editor = editor_command(std::env::var("VISUAL").ok(), std::env::var("EDITOR").ok());
    let status = std::process::Command::new(&editor)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch {} for {}", editor, path.display()))?;

    if !status.success() {
        Output::warning(&format!("{} exited with {}", editor, status));
        return Ok(());
    }

    match Settings::load_from(Some(path)) {
        Ok(_) => Output::success(&format!("Saved {}", path.display())),
        Err(e) => Output::warning(&format!(
            "{} was saved but does not parse: {}",
            path.display(),
            e
        )),
    }
    Ok(())
}
