//! Debate outcome types

use crate::debate::{AbortReason, ArgumentRecord, CouncilId, Position};
use serde::{Deserialize, Serialize};

/// Council recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Adopt,
    Reject,
    Conditional,
    Split,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Adopt => "ADOPT",
            Recommendation::Reject => "REJECT",
            Recommendation::Conditional => "CONDITIONAL",
            Recommendation::Split => "SPLIT",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final-vote tally per position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteBreakdown {
    #[serde(rename = "SUPPORT")]
    pub support: usize,
    #[serde(rename = "OPPOSE")]
    pub oppose: usize,
    #[serde(rename = "NEUTRAL")]
    pub neutral: usize,
}

impl VoteBreakdown {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ArgumentRecord>) -> Self {
        let mut breakdown = Self::default();
        for record in records {
            match record.position {
                Position::Support => breakdown.support += 1,
                Position::Oppose => breakdown.oppose += 1,
                Position::Neutral => breakdown.neutral += 1,
            }
        }
        breakdown
    }

    pub fn total(&self) -> usize {
        self.support + self.oppose + self.neutral
    }

    pub fn count(&self, position: Position) -> usize {
        match position {
            Position::Support => self.support,
            Position::Oppose => self.oppose,
            Position::Neutral => self.neutral,
        }
    }

    /// Share of votes holding `position` (0.0 when there are no votes)
    pub fn share(&self, position: Position) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(position) as f64 / total as f64,
        }
    }

    /// Largest share held by any single position
    pub fn agreement(&self) -> f64 {
        Position::ALL
            .iter()
            .map(|p| self.share(*p))
            .fold(0.0, f64::max)
    }
}

/// Final output of a council (immutable once assembled)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub council_id: Option<CouncilId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub recommendation: Recommendation,
    /// Aggregate confidence (0.0 to 1.0)
    pub confidence: f64,
    pub vote_breakdown: VoteBreakdown,
    /// At most five reasoning excerpts
    pub key_considerations: Vec<String>,
    /// One record per agent: the votes the recommendation was computed from
    pub final_votes: Vec<ArgumentRecord>,
    pub all_arguments: Vec<ArgumentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_reference: Option<String>,
    /// Rounds that closed for every agent (3 for a complete council)
    pub completed_rounds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<AbortReason>,
}

impl DebateResult {
    pub fn new(
        recommendation: Recommendation,
        confidence: f64,
        vote_breakdown: VoteBreakdown,
        key_considerations: Vec<String>,
        final_votes: Vec<ArgumentRecord>,
    ) -> Self {
        Self {
            council_id: None,
            topic: None,
            recommendation,
            confidence,
            vote_breakdown,
            key_considerations,
            all_arguments: final_votes.clone(),
            final_votes,
            manifest_reference: None,
            completed_rounds: 0,
            aborted: None,
        }
    }

    /// `SPLIT` with zero confidence: nothing to vote on
    pub fn empty() -> Self {
        Self::new(
            Recommendation::Split,
            0.0,
            VoteBreakdown::default(),
            Vec::new(),
            Vec::new(),
        )
    }

    pub fn with_council(mut self, council_id: CouncilId, topic: impl Into<String>) -> Self {
        self.council_id = Some(council_id);
        self.topic = Some(topic.into());
        self
    }

    pub fn with_all_arguments(mut self, arguments: Vec<ArgumentRecord>) -> Self {
        self.all_arguments = arguments;
        self
    }

    pub fn with_manifest_reference(mut self, reference: impl Into<String>) -> Self {
        self.manifest_reference = Some(reference.into());
        self
    }

    pub fn with_completed_rounds(mut self, rounds: u32) -> Self {
        self.completed_rounds = rounds;
        self
    }

    pub fn with_abort(mut self, reason: AbortReason) -> Self {
        self.aborted = Some(reason);
        self
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// Whether an approval gate should hold this result for a human
    ///
    /// The engine never acts on this; it is exposed for the governance layer.
    pub fn requires_human_approval(&self, confidence_threshold: f64) -> bool {
        self.recommendation == Recommendation::Split
            || self.confidence < confidence_threshold
            || self.is_aborted()
    }

    /// Arguments from one round, in posting order
    pub fn arguments_for_round(&self, round: u32) -> impl Iterator<Item = &ArgumentRecord> {
        self.all_arguments
            .iter()
            .filter(move |a| a.round_number == round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::{ArgumentDraft, Perspective};

    fn record(agent: &str, draft: ArgumentDraft) -> ArgumentRecord {
        ArgumentRecord::new(agent, Perspective::Cost, 3, draft)
    }

    #[test]
    fn test_breakdown_counts_and_shares() {
        let records = vec![
            record("a", ArgumentDraft::support("", 0.5)),
            record("b", ArgumentDraft::support("", 0.5)),
            record("c", ArgumentDraft::oppose("", 0.5)),
            record("d", ArgumentDraft::neutral("", 0.5)),
        ];
        let breakdown = VoteBreakdown::from_records(&records);
        assert_eq!(breakdown.total(), 4);
        assert_eq!(breakdown.share(Position::Support), 0.5);
        assert_eq!(breakdown.agreement(), 0.5);
    }

    #[test]
    fn test_breakdown_serializes_with_position_keys() {
        let breakdown = VoteBreakdown {
            support: 2,
            oppose: 0,
            neutral: 1,
        };
        let value = serde_json::to_value(breakdown).unwrap();
        assert_eq!(value, serde_json::json!({"SUPPORT": 2, "OPPOSE": 0, "NEUTRAL": 1}));
    }

    #[test]
    fn test_empty_result() {
        let result = DebateResult::empty();
        assert_eq!(result.recommendation, Recommendation::Split);
        assert_eq!(result.confidence, 0.0);
        assert!(result.key_considerations.is_empty());
        assert!(result.requires_human_approval(0.5));
    }

    #[test]
    fn test_requires_human_approval() {
        let confident = DebateResult::new(
            Recommendation::Adopt,
            0.9,
            VoteBreakdown::default(),
            Vec::new(),
            Vec::new(),
        );
        assert!(!confident.requires_human_approval(0.6));
        assert!(confident.clone().with_abort(AbortReason::ConcurrencyLimit { limit: 2 }).requires_human_approval(0.6));
        assert!(confident.requires_human_approval(0.95));
    }
}
