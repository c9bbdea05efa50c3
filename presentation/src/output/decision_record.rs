//! Markdown decision record generator
//!
//! Turns a [`DebateResult`] into an architecture decision record that can
//! be committed next to the code it concerns.

use council_domain::core::text::truncate;
use council_domain::{DebateResult, Recommendation};

/// Builder for a Markdown decision record
#[derive(Debug, Clone)]
pub struct DecisionRecord<'a> {
    result: &'a DebateResult,
    approval_threshold: f64,
    date: String,
}

impl<'a> DecisionRecord<'a> {
    pub fn new(result: &'a DebateResult, approval_threshold: f64) -> Self {
        Self {
            result,
            approval_threshold,
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Override the record date (`YYYY-MM-DD`)
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// `Proposed` for confident verdicts, otherwise held for review
    pub fn status(&self) -> &'static str {
        if self.result.requires_human_approval(self.approval_threshold) {
            "Needs human review"
        } else {
            "Proposed"
        }
    }

    pub fn render(&self) -> String {
        let result = self.result;
        let topic = result.topic.as_deref().unwrap_or("Untitled decision");
        let mut doc = String::new();

        doc.push_str(&format!("# Decision: {}\n\n", topic));
        doc.push_str(&format!("- **Status:** {}\n", self.status()));
        doc.push_str(&format!("- **Date:** {}\n", self.date));
        if let Some(id) = &result.council_id {
            doc.push_str(&format!("- **Council:** `{}`\n", id));
        }
        doc.push_str(&format!(
            "- **Recommendation:** {}\n",
            result.recommendation.as_str()
        ));
        doc.push_str(&format!(
            "- **Confidence:** {:.0}%\n\n",
            result.confidence * 100.0
        ));

        doc.push_str("## Context\n\n");
        doc.push_str(&format!(
            "A council of {} perspective agents debated this decision over {} of 3 rounds.\n",
            result.final_votes.len(),
            result.completed_rounds
        ));
        if let Some(reason) = &result.aborted {
            doc.push_str(&format!(
                "\n> **Note:** the debate stopped early: {}. The verdict reflects the last completed round.\n",
                reason
            ));
        }
        doc.push('\n');

        doc.push_str("## Decision\n\n");
        doc.push_str(Self::decision_sentence(result.recommendation));
        doc.push_str("\n\n");

        doc.push_str("## Positions\n\n");
        if result.final_votes.is_empty() {
            doc.push_str("No agent reached a final position.\n\n");
        } else {
            doc.push_str("| Agent | Perspective | Position | Confidence | Rationale |\n");
            doc.push_str("|---|---|---|---|---|\n");
            for vote in &result.final_votes {
                doc.push_str(&format!(
                    "| {} | {} | {} | {:.2} | {} |\n",
                    vote.agent_id,
                    vote.perspective,
                    vote.position.as_str(),
                    vote.confidence,
                    Self::cell(vote.leading_sentence())
                ));
            }
            doc.push('\n');
        }

        let votes = &result.vote_breakdown;
        doc.push_str("## Vote Breakdown\n\n");
        doc.push_str("| SUPPORT | OPPOSE | NEUTRAL |\n");
        doc.push_str("|---|---|---|\n");
        doc.push_str(&format!(
            "| {} | {} | {} |\n\n",
            votes.support, votes.oppose, votes.neutral
        ));

        doc.push_str("## Key Considerations\n\n");
        if result.key_considerations.is_empty() {
            doc.push_str("None recorded.\n");
        } else {
            for point in &result.key_considerations {
                doc.push_str(&format!("- {}\n", point));
            }
        }

        if let Some(reference) = &result.manifest_reference {
            doc.push_str("\n## Audit Trail\n\n");
            doc.push_str(&format!("Full debate manifest: [{}]({})\n", reference, reference));
        }

        doc
    }

    fn decision_sentence(recommendation: Recommendation) -> &'static str {
        match recommendation {
            Recommendation::Adopt => "The council recommends adopting this proposal.",
            Recommendation::Reject => "The council recommends rejecting this proposal.",
            Recommendation::Conditional => {
                "The council leans towards adopting this proposal once the concerns below are addressed."
            }
            Recommendation::Split => {
                "The council could not reach a recommendation; a human decision is required."
            }
        }
    }

    /// Escape a value for a single Markdown table cell
    fn cell(text: &str) -> String {
        truncate(&text.replace('|', "\\|").replace('\n', " "), 120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AbortReason, ArgumentDraft, ArgumentRecord, CouncilId, Perspective, VoteAggregator,
    };

    fn finals() -> Vec<ArgumentRecord> {
        vec![
            ArgumentRecord::new(
                "cost_analyst",
                Perspective::Cost,
                3,
                ArgumentDraft::support("Licensing is cheaper | per seat. More detail.", 0.9),
            ),
            ArgumentRecord::new(
                "security_analyst",
                Perspective::Security,
                3,
                ArgumentDraft::support("SSO support closes our gap.", 0.8),
            ),
        ]
    }

    #[test]
    fn test_renders_all_sections() {
        let result = VoteAggregator::synthesize(&finals())
            .with_council(CouncilId::from("COUNCIL-ADR"), "Adopt VendorX for auth")
            .with_completed_rounds(3)
            .with_manifest_reference(".council/manifests/COUNCIL-ADR.jsonl");
        let doc = DecisionRecord::new(&result, 0.6)
            .with_date("2026-01-02")
            .render();

        assert!(doc.starts_with("# Decision: Adopt VendorX for auth\n"));
        assert!(doc.contains("- **Status:** Proposed"));
        assert!(doc.contains("- **Date:** 2026-01-02"));
        assert!(doc.contains("- **Recommendation:** ADOPT"));
        assert!(doc.contains("| cost_analyst | cost | SUPPORT | 0.90 | Licensing is cheaper \\| per seat. |"));
        assert!(doc.contains("| 2 | 0 | 0 |"));
        assert!(doc.contains("## Audit Trail"));
        assert!(doc.contains("COUNCIL-ADR.jsonl"));
    }

    #[test]
    fn test_aborted_result_needs_review() {
        let result = VoteAggregator::synthesize(&finals())
            .with_completed_rounds(1)
            .with_abort(AbortReason::Cancelled);
        let record = DecisionRecord::new(&result, 0.6);
        assert_eq!(record.status(), "Needs human review");

        let doc = record.render();
        assert!(doc.starts_with("# Decision: Untitled decision"));
        assert!(doc.contains("stopped early: debate was cancelled"));
        assert!(!doc.contains("## Audit Trail"));
    }

    #[test]
    fn test_split_without_votes() {
        let result = DebateResult::empty();
        let doc = DecisionRecord::new(&result, 0.6).render();
        assert!(doc.contains("- **Status:** Needs human review"));
        assert!(doc.contains("No agent reached a final position."));
        assert!(doc.contains("a human decision is required"));
        assert!(doc.contains("None recorded."));
    }
}
