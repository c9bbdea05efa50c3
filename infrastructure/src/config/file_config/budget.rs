//! Spend ceilings from TOML (`[budget]` section)

use super::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};

/// Raw budget configuration from TOML. Unset means no ceiling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBudgetConfig {
    /// Ceiling for a single debate, in USD
    pub per_debate_usd: Option<f64>,
    /// Ceiling across all debates in one UTC day, in USD
    pub daily_usd: Option<f64>,
}

impl FileBudgetConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("budget.per_debate_usd", self.per_debate_usd),
            ("budget.daily_usd", self.daily_usd),
        ] {
            if let Some(usd) = value
                && !(usd.is_finite() && usd > 0.0)
            {
                issues.push(ConfigIssue::new(
                    Severity::Error,
                    field,
                    format!("{} must be a positive amount, got {}", field, usd),
                ));
            }
        }
        if let (Some(debate), Some(daily)) = (self.per_debate_usd, self.daily_usd)
            && debate > daily
        {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "budget.per_debate_usd",
                "per_debate_usd is larger than daily_usd",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_validation() {
        assert!(FileBudgetConfig::default().validate().is_empty());

        let negative = FileBudgetConfig {
            per_debate_usd: Some(-1.0),
            daily_usd: None,
        };
        assert_eq!(negative.validate()[0].severity, Severity::Error);

        let inverted = FileBudgetConfig {
            per_debate_usd: Some(5.0),
            daily_usd: Some(1.0),
        };
        assert_eq!(inverted.validate()[0].severity, Severity::Warning);
    }
}
