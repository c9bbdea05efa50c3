//! Council configuration from TOML (`[council]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [council]
//! perspectives = ["cost", "security", "performance"]
//! max_agents = 5
//! max_concurrent_councils = 2
//! agent_timeout_secs = 300
//! debate_timeout_secs = 1800
//! approval_threshold = 0.6
//! ```

use super::{ConfigIssue, Severity};
use council_domain::Perspective;
use serde::{Deserialize, Serialize};

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Perspectives used when none are given on the command line
    pub perspectives: Vec<String>,
    pub max_agents: usize,
    pub max_concurrent_councils: usize,
    pub agent_timeout_secs: u64,
    pub debate_timeout_secs: u64,
    /// Results below this confidence are flagged for human approval
    pub approval_threshold: f64,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            perspectives: vec![
                "cost".to_string(),
                "security".to_string(),
                "performance".to_string(),
            ],
            max_agents: 5,
            max_concurrent_councils: 2,
            agent_timeout_secs: 300,
            debate_timeout_secs: 1800,
            approval_threshold: 0.6,
        }
    }
}

impl FileCouncilConfig {
    /// Parse perspective names, dropping blanks
    pub fn parse_perspectives(&self) -> (Vec<Perspective>, Vec<ConfigIssue>) {
        let mut perspectives = Vec::new();
        let mut issues = Vec::new();
        for name in &self.perspectives {
            if name.trim().is_empty() {
                issues.push(ConfigIssue::new(
                    Severity::Warning,
                    "council.perspectives",
                    "empty perspective name ignored",
                ));
                continue;
            }
            let Ok(perspective) = name.parse::<Perspective>();
            perspectives.push(perspective);
        }
        (perspectives, issues)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_perspectives().1;

        if self.max_agents == 0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "council.max_agents",
                "max_agents must be at least 1",
            ));
        }
        if self.max_concurrent_councils == 0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "council.max_concurrent_councils",
                "max_concurrent_councils must be at least 1",
            ));
        }
        if self.agent_timeout_secs == 0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "council.agent_timeout_secs",
                "agent_timeout_secs cannot be 0",
            ));
        }
        if self.debate_timeout_secs == 0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "council.debate_timeout_secs",
                "debate_timeout_secs cannot be 0",
            ));
        } else if self.debate_timeout_secs < self.agent_timeout_secs {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "council.debate_timeout_secs",
                format!(
                    "debate_timeout_secs ({}) is shorter than agent_timeout_secs ({}); agents will be cut off by the debate deadline",
                    self.debate_timeout_secs, self.agent_timeout_secs
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.approval_threshold) {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "council.approval_threshold",
                format!(
                    "approval_threshold must be between 0.0 and 1.0, got {}",
                    self.approval_threshold
                ),
            ));
        }

        let configured = self.parse_perspectives().0.len();
        if configured > self.max_agents {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "council.perspectives",
                format!(
                    "{} default perspectives exceed max_agents ({})",
                    configured, self.max_agents
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
        assert!(FileCouncilConfig::default().validate().is_empty());
    }

    #[test]
    fn test_parse_perspectives() {
        let config = FileCouncilConfig {
            perspectives: vec!["Cost".to_string(), " ".to_string(), "legal".to_string()],
            ..Default::default()
        };
        let (perspectives, issues) = config.parse_perspectives();
        assert_eq!(
            perspectives,
            vec![Perspective::Cost, Perspective::Custom("legal".to_string())]
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_zero_limits_are_errors() {
        let config = FileCouncilConfig {
            max_agents: 0,
            agent_timeout_secs: 0,
            ..Default::default()
        };
        let errors: Vec<_> = config
            .validate()
            .into_iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.field)
            .collect();
        assert!(errors.contains(&"council.max_agents".to_string()));
        assert!(errors.contains(&"council.agent_timeout_secs".to_string()));
    }
}
