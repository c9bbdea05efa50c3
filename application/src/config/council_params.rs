//! Council parameters: limits and budgets for running debates.
//!
//! [`CouncilParams`] is the typed runtime form of the `[council]` and
//! `[budget]` config sections. These are application-layer concerns, not
//! domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied to every council an orchestrator runs.
///
/// | Limit | Default | On breach |
/// |-------|---------|-----------|
/// | `max_agents` | 5 | configuration error |
/// | `agent_timeout` | 300s | NEUTRAL/0.0 fallback for that agent |
/// | `debate_timeout` | 1800s | council aborted |
/// | `max_concurrent_councils` | 2 | council aborted before Round 1 |
/// | `debate_budget_usd` | none | council aborted at the next checkpoint |
/// | `daily_budget_usd` | none | council aborted at the next checkpoint |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilParams {
    pub max_agents: usize,
    pub max_concurrent_councils: usize,
    /// Limit for a single agent call
    pub agent_timeout: Duration,
    /// Wall-clock budget for the whole debate
    pub debate_timeout: Duration,
    pub debate_budget_usd: Option<f64>,
    pub daily_budget_usd: Option<f64>,
    /// Results below this confidence are flagged for human approval
    pub approval_threshold: f64,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            max_agents: 5,
            max_concurrent_councils: 2,
            agent_timeout: Duration::from_secs(300),
            debate_timeout: Duration::from_secs(1800),
            debate_budget_usd: None,
            daily_budget_usd: None,
            approval_threshold: 0.6,
        }
    }
}

impl CouncilParams {
    // ==================== Builder Methods ====================

    pub fn with_max_agents(mut self, max: usize) -> Self {
        self.max_agents = max;
        self
    }

    pub fn with_max_concurrent_councils(mut self, max: usize) -> Self {
        self.max_concurrent_councils = max;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn with_debate_timeout(mut self, timeout: Duration) -> Self {
        self.debate_timeout = timeout;
        self
    }

    pub fn with_debate_budget_usd(mut self, usd: Option<f64>) -> Self {
        self.debate_budget_usd = usd;
        self
    }

    pub fn with_daily_budget_usd(mut self, usd: Option<f64>) -> Self {
        self.daily_budget_usd = usd;
        self
    }

    pub fn with_approval_threshold(mut self, threshold: f64) -> Self {
        self.approval_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = CouncilParams::default();
        assert_eq!(params.max_agents, 5);
        assert_eq!(params.max_concurrent_councils, 2);
        assert_eq!(params.agent_timeout, Duration::from_secs(300));
        assert_eq!(params.debate_timeout, Duration::from_secs(1800));
        assert!(params.debate_budget_usd.is_none());
    }

    #[test]
    fn test_builder() {
        let params = CouncilParams::default()
            .with_max_agents(3)
            .with_agent_timeout(Duration::from_secs(10))
            .with_debate_budget_usd(Some(2.5))
            .with_approval_threshold(1.5);
        assert_eq!(params.max_agents, 3);
        assert_eq!(params.agent_timeout, Duration::from_secs(10));
        assert_eq!(params.debate_budget_usd, Some(2.5));
        assert_eq!(params.approval_threshold, 1.0);
    }
}
