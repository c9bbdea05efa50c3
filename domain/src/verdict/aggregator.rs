//! Vote aggregation: final arguments in, recommendation out.

use super::considerations::{MAX_KEY_CONSIDERATIONS, select_key_considerations};
use super::result::{DebateResult, Recommendation, VoteBreakdown};
use crate::debate::{ArgumentRecord, Position};

/// Turns each agent's final argument into a council recommendation.
///
/// Pure: the same input always yields the same [`DebateResult`].
///
/// # Rules (first match wins)
///
/// | Condition | Recommendation |
/// |-----------|----------------|
/// | `p_support > 0.70` | `ADOPT` |
/// | `p_oppose > 0.70` | `REJECT` |
/// | `0.40 ≤ p_support ≤ 0.70` | `CONDITIONAL` |
/// | otherwise | `SPLIT` |
///
/// # Example
///
/// ```
/// use council_domain::{ArgumentDraft, ArgumentRecord, Perspective, Recommendation, VoteAggregator};
///
/// let votes = vec![
///     ArgumentRecord::new("cost_analyst", Perspective::Cost, 3, ArgumentDraft::support("Cheaper.", 0.8)),
///     ArgumentRecord::new("security_analyst", Perspective::Security, 3, ArgumentDraft::support("Safe.", 0.9)),
/// ];
/// let result = VoteAggregator::synthesize(&votes);
/// assert_eq!(result.recommendation, Recommendation::Adopt);
/// assert!(result.confidence <= 0.8);
/// ```
pub struct VoteAggregator;

impl VoteAggregator {
    pub const ADOPT_THRESHOLD: f64 = 0.70;
    pub const REJECT_THRESHOLD: f64 = 0.70;
    pub const CONDITIONAL_FLOOR: f64 = 0.40;

    /// Aggregate final arguments into a result.
    ///
    /// Each agent casts one vote: if an agent appears more than once, its
    /// latest record (highest round, then latest in the slice) is used.
    pub fn synthesize(arguments: &[ArgumentRecord]) -> DebateResult {
        let votes = Self::final_votes(arguments);
        if votes.is_empty() {
            return DebateResult::empty().with_all_arguments(arguments.to_vec());
        }

        let breakdown = VoteBreakdown::from_records(&votes);
        let recommendation = Self::recommend(&breakdown);
        let confidence = Self::confidence(&votes, &breakdown, recommendation);
        let key_considerations = select_key_considerations(&votes, MAX_KEY_CONSIDERATIONS);

        DebateResult::new(
            recommendation,
            confidence,
            breakdown,
            key_considerations,
            votes,
        )
        .with_all_arguments(arguments.to_vec())
    }

    /// Apply the threshold rules to a tally
    pub fn recommend(breakdown: &VoteBreakdown) -> Recommendation {
        if breakdown.total() == 0 {
            return Recommendation::Split;
        }
        let p_support = breakdown.share(Position::Support);
        let p_oppose = breakdown.share(Position::Oppose);

        if p_support > Self::ADOPT_THRESHOLD {
            Recommendation::Adopt
        } else if p_oppose > Self::REJECT_THRESHOLD {
            Recommendation::Reject
        } else if (Self::CONDITIONAL_FLOOR..=Self::ADOPT_THRESHOLD).contains(&p_support) {
            Recommendation::Conditional
        } else {
            Recommendation::Split
        }
    }

    /// Mean confidence scaled by agreement.
    ///
    /// `ADOPT` is capped by the least-confident supporter and `REJECT` by the
    /// least-confident opposer.
    fn confidence(
        votes: &[ArgumentRecord],
        breakdown: &VoteBreakdown,
        recommendation: Recommendation,
    ) -> f64 {
        let mean = votes.iter().map(|v| v.confidence).sum::<f64>() / votes.len() as f64;
        let mut confidence = mean * breakdown.agreement();

        let cap_position = match recommendation {
            Recommendation::Adopt => Some(Position::Support),
            Recommendation::Reject => Some(Position::Oppose),
            _ => None,
        };
        if let Some(position) = cap_position {
            let weakest = votes
                .iter()
                .filter(|v| v.position == position)
                .map(|v| v.confidence)
                .fold(f64::INFINITY, f64::min);
            confidence = confidence.min(weakest);
        }

        (confidence.clamp(0.0, 1.0) * 10_000.0).round() / 10_000.0
    }

    /// One vote per agent, in order of first appearance
    fn final_votes(arguments: &[ArgumentRecord]) -> Vec<ArgumentRecord> {
        let mut votes: Vec<ArgumentRecord> = Vec::new();
        for record in arguments {
            match votes.iter_mut().find(|v| v.agent_id == record.agent_id) {
                Some(existing) if record.round_number >= existing.round_number => {
                    *existing = record.clone();
                }
                Some(_) => {}
                None => votes.push(record.clone()),
            }
        }
        votes
    }
}
