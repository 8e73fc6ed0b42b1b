//! Pre-flight checks before starting the relay.
//!
//! Validates that the selected provider's API key is available so the
//! server doesn't start up only to fail every request.

use crate::config::LlmProvider;
use crate::error::{Result, TubeSeoError};

/// Check that the API key for `provider` is configured.
pub fn check_api_key(provider: LlmProvider) -> Result<()> {
    check_api_key_value(provider, std::env::var(provider.api_key_var()).ok())
}

fn check_api_key_value(provider: LlmProvider, value: Option<String>) -> Result<()> {
    let var = provider.api_key_var();
    match value {
        Some(key) if !key.trim().is_empty() => Ok(()),
        Some(_) => Err(TubeSeoError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            var, var
        ))),
        None => Err(TubeSeoError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            var, var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_present() {
        assert!(check_api_key_value(LlmProvider::OpenAI, Some("sk-test".to_string())).is_ok());
    }

    #[test]
    fn test_key_missing_or_empty() {
        let err = check_api_key_value(LlmProvider::Anthropic, None).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY not set"));

        let err = check_api_key_value(LlmProvider::OpenAI, Some("  ".to_string())).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY is empty"));
    }
}
