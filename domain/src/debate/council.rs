//! Council identity, lifecycle states and abort reasons

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of one council (`COUNCIL-{timestamp}-{random}`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouncilId(String);

impl CouncilId {
    /// Generate a fresh identifier from the current UTC time and a random suffix
    pub fn generate() -> Self {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("COUNCIL-{}-{}", stamp, &random[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CouncilId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CouncilId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CouncilId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a council
///
/// ```text
/// Init → Round1Analyze → Round2Rebut → Round3Synthesize → Aggregating → Done
/// ```
///
/// Transitions go one step at a time. The only forward jump is an abort,
/// which moves any round state straight to `Aggregating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouncilState {
    Init,
    #[serde(rename = "ROUND1_ANALYZE")]
    Round1Analyze,
    #[serde(rename = "ROUND2_REBUT")]
    Round2Rebut,
    #[serde(rename = "ROUND3_SYNTHESIZE")]
    Round3Synthesize,
    Aggregating,
    Done,
}

impl CouncilState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilState::Init => "INIT",
            CouncilState::Round1Analyze => "ROUND1_ANALYZE",
            CouncilState::Round2Rebut => "ROUND2_REBUT",
            CouncilState::Round3Synthesize => "ROUND3_SYNTHESIZE",
            CouncilState::Aggregating => "AGGREGATING",
            CouncilState::Done => "DONE",
        }
    }

    /// The only state reachable by a normal transition
    pub fn next(&self) -> Option<CouncilState> {
        match self {
            CouncilState::Init => Some(CouncilState::Round1Analyze),
            CouncilState::Round1Analyze => Some(CouncilState::Round2Rebut),
            CouncilState::Round2Rebut => Some(CouncilState::Round3Synthesize),
            CouncilState::Round3Synthesize => Some(CouncilState::Aggregating),
            CouncilState::Aggregating => Some(CouncilState::Done),
            CouncilState::Done => None,
        }
    }

    /// Debate round driven in this state, if any
    pub fn round(&self) -> Option<u32> {
        match self {
            CouncilState::Round1Analyze => Some(1),
            CouncilState::Round2Rebut => Some(2),
            CouncilState::Round3Synthesize => Some(3),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilState::Done)
    }

    /// Move to `to`, refusing any transition that skips a state
    pub fn transition(self, to: CouncilState) -> Result<CouncilState, DomainError> {
        if self.next() == Some(to) {
            Ok(to)
        } else {
            Err(self.invalid(to))
        }
    }

    /// Abort a running council: any round state (or `Init`) jumps to `Aggregating`
    pub fn abort(self) -> Result<CouncilState, DomainError> {
        if self == CouncilState::Init || self.round().is_some() {
            Ok(CouncilState::Aggregating)
        } else {
            Err(self.invalid(CouncilState::Aggregating))
        }
    }

    fn invalid(self, to: CouncilState) -> DomainError {
        DomainError::InvalidTransition {
            from: self.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CouncilState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a council was cut short (resource-exhaustion circuit breaker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbortReason {
    /// Wall-clock budget for the whole debate was exhausted
    DeadlineExceeded { budget_secs: u64 },
    /// Spend for this debate passed its ceiling
    DebateBudgetExceeded { spent_usd: f64, ceiling_usd: f64 },
    /// Spend across today's debates passed the daily ceiling
    DailyBudgetExceeded { spent_usd: f64, ceiling_usd: f64 },
    /// Too many councils already running
    ConcurrencyLimit { limit: usize },
    /// The caller cancelled the debate
    Cancelled,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::DeadlineExceeded { budget_secs } => {
                write!(f, "debate exceeded its {}s wall-clock budget", budget_secs)
            }
            AbortReason::DebateBudgetExceeded {
                spent_usd,
                ceiling_usd,
            } => write!(
                f,
                "debate spend ${:.2} exceeded ceiling ${:.2}",
                spent_usd, ceiling_usd
            ),
            AbortReason::DailyBudgetExceeded {
                spent_usd,
                ceiling_usd,
            } => write!(
                f,
                "daily spend ${:.2} exceeded ceiling ${:.2}",
                spent_usd, ceiling_usd
            ),
            AbortReason::ConcurrencyLimit { limit } => {
                write!(f, "{} councils already running", limit)
            }
            AbortReason::Cancelled => write!(f, "debate was cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_council_id_format() {
        let id = CouncilId::generate();
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "COUNCIL");
        assert_eq!(parts[2].len(), 8);
        assert_ne!(id, CouncilId::generate());
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut state = CouncilState::Init;
        let mut visited = vec![state];
        while let Some(next) = state.next() {
            state = state.transition(next).unwrap();
            visited.push(state);
        }
        assert_eq!(visited.len(), 6);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_skipping_a_state_is_rejected() {
        let err = CouncilState::Round1Analyze
            .transition(CouncilState::Round3Synthesize)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert!(CouncilState::Done.transition(CouncilState::Init).is_err());
    }

    #[test]
    fn test_abort_from_round_goes_to_aggregating() {
        assert_eq!(
            CouncilState::Round2Rebut.abort().unwrap(),
            CouncilState::Aggregating
        );
        assert!(CouncilState::Done.abort().is_err());
    }

    #[test]
    fn test_abort_reason_serialization() {
        let reason = AbortReason::ConcurrencyLimit { limit: 2 };
        let value = serde_json::to_value(&reason).unwrap();
        assert_eq!(value["kind"], "concurrency_limit");
        assert_eq!(value["limit"], 2);
    }
}
