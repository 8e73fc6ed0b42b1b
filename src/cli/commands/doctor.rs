//! Doctor command - verify configuration and relay availability.

use crate::cli::Output;
use crate::client::RelayClient;
use crate::config::{LlmProvider, Settings};
use console::style;
use std::time::Duration;

/// Timeout for the relay health check.
const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("tubeseo Doctor");
    println!();
    println!("Checking configuration and relay availability...\n");

    let mut checks = Vec::new();

    println!("{}", style("LLM Provider").bold());
    let provider = settings.llm.provider;
    let key_check = check_api_key(provider, std::env::var(provider.api_key_var()).ok());
    let provider_check = CheckResult::ok(
        "Provider",
        &format!("{} ({})", provider, settings.llm.model()),
    );
    provider_check.print();
    key_check.print();
    checks.push(provider_check);
    checks.push(key_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);
    if let Some(dir) = &settings.prompts.custom_dir {
        let prompt_check = check_prompt_dir(dir);
        prompt_check.print();
        checks.push(prompt_check);
    }

    println!();

    println!("{}", style("Relay Service").bold());
    let relay_check = check_relay(&settings.client.server_url).await;
    relay_check.print();
    checks.push(relay_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using tubeseo.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! tubeseo is ready to use.");
    }

    Ok(())
}

/// Check that the provider's API key is configured.
fn check_api_key(provider: LlmProvider, value: Option<String>) -> CheckResult {
    let var = provider.api_key_var();
    let set_hint = format!("Set with: export {}='...'", var);

    match value {
        Some(key) if key.trim().is_empty() => CheckResult::error(var, "empty", &set_hint),
        Some(key) if key.chars().count() > 12 => {
            let chars: Vec<char> = key.chars().collect();
            let masked = format!(
                "{}...{}",
                chars[..7].iter().collect::<String>(),
                chars[chars.len() - 4..].iter().collect::<String>()
            );
            CheckResult::ok(var, &format!("configured ({})", masked))
        }
        Some(_) => CheckResult::warning(
            var,
            "set but looks too short",
            "Double-check the key you copied from the provider console",
        ),
        None => CheckResult::error(var, "not set", &set_hint),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tubeseo config edit",
        )
    }
}

/// Check the custom prompts directory.
fn check_prompt_dir(dir: &str) -> CheckResult {
    let path = Settings::expand_path(dir);
    if path.is_dir() {
        CheckResult::ok("Custom prompts", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Custom prompts",
            &format!("{} not found", path.display()),
            "Default prompts will be used",
        )
    }
}

/// Check that the relay answers its health endpoint.
async fn check_relay(server_url: &str) -> CheckResult {
    let client = match RelayClient::new(server_url, Duration::from_secs(HEALTH_TIMEOUT_SECS)) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::error(
                "Relay",
                &e.to_string(),
                "Check client.server_url in the config",
            )
        }
    };

    match client.health().await {
        Ok(health) => {
            let model = health["model"].as_str().unwrap_or("unknown model");
            CheckResult::ok("Relay", &format!("{} ({})", server_url, model))
        }
        Err(e) => CheckResult::warning(
            "Relay",
            &format!("{} unreachable: {}", server_url, e),
            "Start it with: tubeseo serve (only needed for 'tubeseo process')",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_api_key() {
        let ok = check_api_key(LlmProvider::OpenAI, Some("sk-proj-abcdefghijklmnop".to_string()));
        assert_eq!(ok.status, CheckStatus::Ok);
        assert!(ok.message.contains("sk-proj...mnop"));

        let missing = check_api_key(LlmProvider::Anthropic, None);
        assert_eq!(missing.status, CheckStatus::Error);
        assert_eq!(missing.name, "ANTHROPIC_API_KEY");

        let short = check_api_key(LlmProvider::OpenAI, Some("sk-1".to_string()));
        assert_eq!(short.status, CheckStatus::Warning);
    }

    #[test]
    fn test_check_prompt_dir() {
        let dir = tempfile::tempdir().unwrap();
        let found = check_prompt_dir(dir.path().to_str().unwrap());
        assert_eq!(found.status, CheckStatus::Ok);

        let missing = check_prompt_dir(dir.path().join("nope").to_str().unwrap());
        assert_eq!(missing.status, CheckStatus::Warning);
    }

    #[tokio::test]
    async fn test_check_relay_unreachable() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let result = check_relay("http://127.0.0.1:9").await;
        assert_eq!(result.status, CheckStatus::Warning);
    }
}
