//! Argument records: the immutable unit of an agent's stance

use super::perspective::Perspective;
use super::position::Position;
use crate::core::now_millis;
use crate::core::text::leading_sentence;
use serde::{Deserialize, Serialize};

/// Clamp a self-reported confidence into `[0.0, 1.0]`, mapping NaN to 0.0
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// What an agent hands back from a round, before the orchestrator stamps it
///
/// Agents never construct [`ArgumentRecord`]s for the ledger themselves:
/// identity, round number and timestamp are filled in by whoever posts the
/// draft, so an agent cannot speak for another agent or another round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDraft {
    pub position: Position,
    pub reasoning: String,
    pub confidence: f64,
}

impl ArgumentDraft {
    pub fn new(position: Position, reasoning: impl Into<String>, confidence: f64) -> Self {
        Self {
            position,
            reasoning: reasoning.into(),
            confidence: clamp_confidence(confidence),
        }
    }

    pub fn support(reasoning: impl Into<String>, confidence: f64) -> Self {
        Self::new(Position::Support, reasoning, confidence)
    }

    pub fn oppose(reasoning: impl Into<String>, confidence: f64) -> Self {
        Self::new(Position::Oppose, reasoning, confidence)
    }

    pub fn neutral(reasoning: impl Into<String>, confidence: f64) -> Self {
        Self::new(Position::Neutral, reasoning, confidence)
    }
}

/// A posted argument (immutable once in the debate context)
///
/// Corrections are new records in a later round, never edits.
///
/// # Example
///
/// ```
/// use council_domain::{ArgumentDraft, ArgumentRecord, Perspective, Position};
///
/// let record = ArgumentRecord::new(
///     "cost_analyst",
///     Perspective::Cost,
///     1,
///     ArgumentDraft::support("Licensing drops by 40%. Migration is cheap.", 0.8),
/// );
/// assert_eq!(record.position, Position::Support);
/// assert_eq!(record.leading_sentence(), "Licensing drops by 40%.");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    pub agent_id: String,
    pub perspective: Perspective,
    pub position: Position,
    pub reasoning: String,
    /// Self-reported confidence (0.0 to 1.0)
    pub confidence: f64,
    /// Round this record belongs to (1-indexed)
    pub round_number: u32,
    /// Milliseconds since epoch
    pub timestamp: u64,
    /// Set only on stand-ins for failed or timed-out agent calls
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl ArgumentRecord {
    /// Stamp a draft with the author's identity and round
    pub fn new(
        agent_id: impl Into<String>,
        perspective: Perspective,
        round_number: u32,
        draft: ArgumentDraft,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            perspective,
            position: draft.position,
            reasoning: draft.reasoning,
            confidence: clamp_confidence(draft.confidence),
            round_number,
            timestamp: now_millis(),
            fallback: false,
        }
    }

    /// `NEUTRAL`/0.0 stand-in for an agent that failed or timed out
    pub fn fallback(
        agent_id: impl Into<String>,
        perspective: Perspective,
        round_number: u32,
        reason: &str,
    ) -> Self {
        Self {
            fallback: true,
            ..Self::new(
                agent_id,
                perspective,
                round_number,
                ArgumentDraft::neutral(format!("No position recorded: {}", reason), 0.0),
            )
        }
    }

    /// Whether this record stands in for an agent that produced nothing
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn leading_sentence(&self) -> &str {
        leading_sentence(&self.reasoning)
    }

    /// Whether the reasoning references `agent_id` (`@agent_id` or bare id)
    pub fn cites(&self, agent_id: &str) -> bool {
        self.agent_id != agent_id && self.reasoning.contains(agent_id)
    }

    pub fn to_draft(&self) -> ArgumentDraft {
        ArgumentDraft {
            position: self.position,
            reasoning: self.reasoning.clone(),
            confidence: self.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let high = ArgumentDraft::support("ok", 1.7);
        assert_eq!(high.confidence, 1.0);
        let low = ArgumentDraft::oppose("no", -0.2);
        assert_eq!(low.confidence, 0.0);
        let nan = ArgumentDraft::neutral("?", f64::NAN);
        assert_eq!(nan.confidence, 0.0);
    }

    #[test]
    fn test_fallback_record() {
        let record = ArgumentRecord::fallback("security_analyst", Perspective::Security, 1, "timeout");
        assert!(record.is_fallback());
        assert_eq!(record.position, Position::Neutral);
        assert_eq!(record.round_number, 1);
        assert!(record.reasoning.contains("timeout"));
        assert_eq!(serde_json::to_value(&record).unwrap()["fallback"], true);
    }

    #[test]
    fn test_genuine_neutral_zero_vote_is_not_fallback() {
        let record = ArgumentRecord::new(
            "performance_analyst",
            Perspective::Performance,
            3,
            ArgumentDraft::neutral("Benchmarks are inconclusive.", 0.0),
        );
        assert!(!record.is_fallback());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("fallback").is_none());
        let back: ArgumentRecord = serde_json::from_value(value).unwrap();
        assert!(!back.fallback);
    }

    #[test]
    fn test_cites_other_agent() {
        let record = ArgumentRecord::new(
            "security_analyst",
            Perspective::Security,
            2,
            ArgumentDraft::oppose("@cost_analyst ignores the audit overhead.", 0.7),
        );
        assert!(record.cites("cost_analyst"));
        assert!(!record.cites("performance_analyst"));
        assert!(!record.cites("security_analyst"));
    }

    #[test]
    fn test_serialized_field_names() {
        let record = ArgumentRecord::new("a", Perspective::Cost, 3, ArgumentDraft::support("x", 0.5));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["round_number"], 3);
        assert_eq!(value["position"], "SUPPORT");
        assert_eq!(value["perspective"], "cost");
    }
}
