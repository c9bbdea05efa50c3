//! Console output formatter for council results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use council_domain::core::text::truncate;
use council_domain::{
    ArgumentRecord, DebateResult, ManifestEvent, ManifestEventType, ManifestStats, Position,
    Recommendation,
};

const ROUND_TITLES: [&str; 3] = [
    "Round 1: Independent Analysis",
    "Round 2: Rebuttals",
    "Round 3: Synthesis",
];

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result
    pub fn format(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Council Results"));
        output.push('\n');

        if let Some(topic) = &result.topic {
            output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), topic));
        }
        if let Some(id) = &result.council_id {
            output.push_str(&format!("{} {}\n", "Council:".cyan().bold(), id));
        }
        output.push('\n');

        for (index, title) in ROUND_TITLES.iter().enumerate() {
            let round = index as u32 + 1;
            let arguments: Vec<&ArgumentRecord> = result.arguments_for_round(round).collect();
            if arguments.is_empty() {
                continue;
            }
            output.push_str(&Self::section_header(title));
            for argument in arguments {
                output.push_str(&Self::argument(argument));
            }
        }

        output.push_str(&Self::section_header("Verdict"));
        output.push('\n');
        output.push_str(&Self::verdict(result));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DebateResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the verdict only (concise output)
    pub fn format_summary(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Council Verdict ===".cyan().bold()));
        if let Some(topic) = &result.topic {
            output.push_str(&format!("{} {}\n\n", "Topic:".bold(), topic));
        }
        output.push_str(&Self::verdict(result));

        output
    }

    /// Timeline and per-type counts of a recorded council
    pub fn format_timeline(events: &[ManifestEvent]) -> String {
        let mut output = String::new();
        let Some(first) = events.first() else {
            return format!("{}\n", "No events recorded.".yellow());
        };

        output.push_str(&Self::header(&format!("Manifest {}", first.council_id)));
        output.push('\n');
        for event in events {
            let elapsed_ms = event.timestamp.saturating_sub(first.timestamp);
            output.push_str(&format!(
                "{:>8}ms  {:<24} {}\n",
                elapsed_ms,
                Self::event_label(event.event),
                Self::event_detail(event).dimmed()
            ));
        }

        let stats = ManifestStats::from_events(events);
        output.push_str(&Self::section_header("Event counts"));
        for (kind, count) in &stats.counts {
            output.push_str(&format!("  {:<24} {}\n", kind.as_str(), count));
        }
        output.push_str(&format!("  {:<24} {}\n", "total".bold(), stats.total()));
        output.push_str(&Self::footer());
        output
    }

    fn verdict(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}  {} {:.0}%\n",
            "Recommendation:".bold(),
            Self::recommendation(result.recommendation),
            "Confidence:".bold(),
            result.confidence * 100.0
        ));

        let votes = &result.vote_breakdown;
        output.push_str(&format!(
            "{} {} support, {} oppose, {} neutral\n",
            "Votes:".bold(),
            votes.support.to_string().green(),
            votes.oppose.to_string().red(),
            votes.neutral.to_string().yellow()
        ));

        if let Some(reason) = &result.aborted {
            output.push_str(&format!(
                "{} {} (after {} of 3 rounds)\n",
                "Aborted:".red().bold(),
                reason,
                result.completed_rounds
            ));
        }

        if !result.final_votes.is_empty() {
            output.push_str(&format!("\n{}\n", "Final positions:".cyan().bold()));
            for vote in &result.final_votes {
                output.push_str(&format!(
                    "  {:<24} {} ({:.2})\n",
                    vote.agent_id,
                    Self::position(vote.position),
                    vote.confidence
                ));
            }
        }

        if !result.key_considerations.is_empty() {
            output.push_str(&format!("\n{}\n", "Key Considerations:".cyan().bold()));
            for point in &result.key_considerations {
                output.push_str(&format!("  * {}\n", point));
            }
        }

        if let Some(reference) = &result.manifest_reference {
            output.push_str(&format!("\n{} {}\n", "Manifest:".dimmed(), reference));
        }

        output
    }

    fn argument(argument: &ArgumentRecord) -> String {
        let title = format!(
            "── {} [{}] {:.2} ──",
            argument.agent_id,
            argument.position.as_str(),
            argument.confidence
        );
        let title = if argument.is_fallback() {
            title.red().bold()
        } else {
            title.yellow().bold()
        };
        format!("\n{}\n{}\n", title, Self::indent(&argument.reasoning, "  "))
    }

    fn recommendation(recommendation: Recommendation) -> ColoredString {
        match recommendation {
            Recommendation::Adopt => recommendation.as_str().green().bold(),
            Recommendation::Reject => recommendation.as_str().red().bold(),
            Recommendation::Conditional => recommendation.as_str().yellow().bold(),
            Recommendation::Split => recommendation.as_str().magenta().bold(),
        }
    }

    fn position(position: Position) -> ColoredString {
        match position {
            Position::Support => position.as_str().green(),
            Position::Oppose => position.as_str().red(),
            Position::Neutral => position.as_str().yellow(),
        }
    }

    fn event_label(kind: ManifestEventType) -> ColoredString {
        match kind {
            ManifestEventType::AgentFailure | ManifestEventType::CouncilAborted => {
                kind.as_str().red()
            }
            ManifestEventType::RecommendationEmitted => kind.as_str().green().bold(),
            _ => kind.as_str().normal(),
        }
    }

    fn event_detail(event: &ManifestEvent) -> String {
        let detail = event
            .payload
            .iter()
            .filter(|(key, _)| key.as_str() != "reasoning")
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => format!("{}={}", key, s),
                other => format!("{}={}", key, other),
            })
            .collect::<Vec<_>>()
            .join(" ");
        truncate(&detail, 100)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DebateResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &DebateResult) -> String {
        Self::format_json(result)
    }

    fn format_summary(&self, result: &DebateResult) -> String {
        Self::format_summary(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AbortReason, ArgumentDraft, CouncilId, Perspective, VoteAggregator,
    };
    use serde_json::json;

    fn result() -> DebateResult {
        let all = vec![
            ArgumentRecord::new("cost_analyst", Perspective::Cost, 1, ArgumentDraft::support("Cheap to run.", 0.8)),
            ArgumentRecord::new("security_analyst", Perspective::Security, 1, ArgumentDraft::oppose("Keys are exposed.", 0.7)),
            ArgumentRecord::new("cost_analyst", Perspective::Cost, 3, ArgumentDraft::support("Still cheap.", 0.8)),
            ArgumentRecord::new("security_analyst", Perspective::Security, 3, ArgumentDraft::support("Keys can be vaulted.", 0.6)),
        ];
        let finals: Vec<ArgumentRecord> = all.iter().filter(|a| a.round_number == 3).cloned().collect();
        VoteAggregator::synthesize(&finals)
            .with_council(CouncilId::from("COUNCIL-T"), "Adopt VendorX")
            .with_all_arguments(all)
            .with_completed_rounds(3)
            .with_manifest_reference("/tmp/COUNCIL-T.jsonl")
    }

    #[test]
    fn test_full_output_lists_rounds_and_verdict() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&result());
        assert!(output.contains("Topic: Adopt VendorX"));
        assert!(output.contains("Round 1: Independent Analysis"));
        assert!(!output.contains("Round 2: Rebuttals"));
        assert!(output.contains("── security_analyst [OPPOSE] 0.70 ──"));
        assert!(output.contains("Recommendation: ADOPT"));
        assert!(output.contains("Manifest: /tmp/COUNCIL-T.jsonl"));
    }

    #[test]
    fn test_summary_shows_abort() {
        colored::control::set_override(false);
        let aborted = result()
            .with_completed_rounds(1)
            .with_abort(AbortReason::DeadlineExceeded { budget_secs: 1800 });
        let output = ConsoleFormatter::format_summary(&aborted);
        assert!(output.contains("Aborted: debate exceeded its 1800s wall-clock budget (after 1 of 3 rounds)"));
        assert!(!output.contains("Round 1"));
    }

    #[test]
    fn test_json_round_trips_recommendation() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&result())).unwrap();
        assert_eq!(value["recommendation"], "ADOPT");
        assert_eq!(value["completed_rounds"], 3);
    }

    #[test]
    fn test_timeline_counts_events() {
        colored::control::set_override(false);
        let id = CouncilId::from("COUNCIL-T");
        let events = vec![
            ManifestEvent::new(ManifestEventType::CouncilInit, id.clone(), json!({"topic": "x"})),
            ManifestEvent::new(ManifestEventType::AgentSpawn, id.clone(), json!({"agent_id": "cost_analyst"})),
            ManifestEvent::new(ManifestEventType::AgentSpawn, id, json!({"agent_id": "security_analyst"})),
        ];
        let output = ConsoleFormatter::format_timeline(&events);
        assert!(output.contains("Manifest COUNCIL-T"));
        assert!(output.contains("agent_id=security_analyst"));
        assert!(output.contains("agent_spawn"));
        assert!(output.contains("total"));
        assert!(ConsoleFormatter::format_timeline(&[]).contains("No events recorded."));
    }
}
