//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod budget;
mod council;
mod output;
mod provider;
mod storage;

pub use budget::FileBudgetConfig;
pub use council::FileCouncilConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::FileProviderConfig;
pub use storage::{FileKnowledgeConfig, FileManifestConfig};

use council_application::CouncilParams;
use council_domain::Perspective;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value is ignored or clamped; the run continues
    Warning,
    /// The run cannot start with this value
    Error,
}

/// A single problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `council.max_agents`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", label, self.field, self.message)
    }
}

/// Configuration rejected because it contains at least one error-level issue
#[derive(Error, Debug)]
#[error("invalid configuration:\n{}", format_issues(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Council sizing and timing
    pub council: FileCouncilConfig,
    /// Spend ceilings
    pub budget: FileBudgetConfig,
    /// Reasoning provider endpoint and pricing
    pub provider: FileProviderConfig,
    /// Where manifests are recorded
    pub manifest: FileManifestConfig,
    /// Reference material for agents
    pub knowledge: FileKnowledgeConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.council.validate());
        issues.extend(self.budget.validate());
        issues.extend(self.provider.validate());

        if self.manifest.enabled && self.manifest.dir.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "manifest.dir",
                "manifest directory cannot be empty while manifests are enabled",
            ));
        }
        issues
    }

    /// Fail if any issue is an error; return the warnings otherwise
    pub fn validated(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigValidationError { issues });
        }
        Ok(issues)
    }

    /// Runtime parameters for the orchestrator
    pub fn council_params(&self) -> CouncilParams {
        CouncilParams::default()
            .with_max_agents(self.council.max_agents)
            .with_max_concurrent_councils(self.council.max_concurrent_councils)
            .with_agent_timeout(Duration::from_secs(self.council.agent_timeout_secs))
            .with_debate_timeout(Duration::from_secs(self.council.debate_timeout_secs))
            .with_debate_budget_usd(self.budget.per_debate_usd)
            .with_daily_budget_usd(self.budget.daily_usd)
            .with_approval_threshold(self.council.approval_threshold)
    }

    /// Default perspectives for a debate with none given explicitly
    pub fn perspectives(&self) -> Vec<Perspective> {
        self.council.parse_perspectives().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[council]
perspectives = ["security", "integration"]
max_agents = 4
agent_timeout_secs = 60

[budget]
per_debate_usd = 2.5
daily_usd = 20.0

[provider]
base_url = "http://localhost:11434/v1"
model = "llama3"

[manifest]
dir = "/var/lib/council"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.perspectives(),
            vec![Perspective::Security, Perspective::Integration]
        );
        assert_eq!(config.council.max_agents, 4);
        assert_eq!(config.budget.per_debate_usd, Some(2.5));
        assert_eq!(config.provider.model, "llama3");
        assert_eq!(config.manifest.dir, "/var/lib/council");
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);

        let params = config.council_params();
        assert_eq!(params.max_agents, 4);
        assert_eq!(params.agent_timeout, Duration::from_secs(60));
        assert_eq!(params.debate_timeout, Duration::from_secs(1800));
        assert_eq!(params.daily_budget_usd, Some(20.0));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[budget]
daily_usd = 5.0
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.budget.daily_usd, Some(5.0));
        // Defaults should apply
        assert_eq!(config.council.max_agents, 5);
        assert_eq!(config.perspectives().len(), 3);
        assert!(config.manifest.enabled);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.validated().unwrap().is_empty());
    }

    #[test]
    fn test_validated_collects_every_error() {
        let mut config = FileConfig::default();
        config.council.debate_timeout_secs = 0;
        config.budget.daily_usd = Some(-3.0);
        config.provider.model = String::new();

        let err = config.validated().unwrap_err();
        let fields: Vec<&str> = err.issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"council.debate_timeout_secs"));
        assert!(fields.contains(&"budget.daily_usd"));
        assert!(fields.contains(&"provider.model"));
        assert!(err.to_string().contains("error: provider.model"));
    }

    #[test]
    fn test_warnings_do_not_fail_validation() {
        let mut config = FileConfig::default();
        config.council.perspectives.push(String::new());
        let warnings = config.validated().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
    }
}
