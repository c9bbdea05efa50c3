//! Reasoning provider configuration from TOML (`[provider]` section)
//!
//! Any endpoint speaking the OpenAI chat-completions protocol works:
//!
//! ```toml
//! [provider]
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! input_price_per_1k = 0.00015
//! output_price_per_1k = 0.0006
//! ```

use super::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};

/// Raw provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    pub model: String,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Direct API key. Prefer `api_key_env`.
    pub api_key: Option<String>,
    /// USD per 1000 prompt tokens
    pub input_price_per_1k: f64,
    /// USD per 1000 completion tokens
    pub output_price_per_1k: f64,
    pub temperature: f64,
    pub max_tokens: u32,
    /// HTTP request timeout
    pub request_timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            input_price_per_1k: 0.0,
            output_price_per_1k: 0.0,
            temperature: 0.2,
            max_tokens: 1024,
            request_timeout_secs: 120,
        }
    }
}

impl FileProviderConfig {
    /// Key from `api_key`, else from the `api_key_env` variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty()))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "provider.model",
                "model name cannot be empty",
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "provider.base_url",
                format!("base_url must be an http(s) URL, got '{}'", self.base_url),
            ));
        }
        if self.input_price_per_1k < 0.0 || self.output_price_per_1k < 0.0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "provider.input_price_per_1k",
                "token prices cannot be negative",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "provider.temperature",
                format!("temperature {} is outside 0.0..=2.0", self.temperature),
            ));
        }
        if self.api_key.is_some() {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "provider.api_key",
                format!(
                    "api_key is stored in the config file; prefer the {} environment variable",
                    self.api_key_env
                ),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FileProviderConfig::default().validate().is_empty());
    }

    #[test]
    fn test_direct_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("sk-test".to_string()),
            api_key_env: "COUNCIL_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-test"));
        assert!(config.validate().iter().any(|i| i.field == "provider.api_key"));
    }

    #[test]
    fn test_bad_url_is_error() {
        let config = FileProviderConfig {
            base_url: "api.example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate()[0].severity, Severity::Error);
    }
}
