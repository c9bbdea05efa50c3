//! Prompt templates for the three debate rounds

use crate::debate::{ArgumentRecord, EvidenceItem, Message, Perspective};

/// Templates for generating prompts at each round
pub struct CouncilPromptTemplate;

impl CouncilPromptTemplate {
    /// Answer format every round asks for
    pub fn response_format() -> &'static str {
        r#"Answer in this format:
POSITION: SUPPORT | OPPOSE | NEUTRAL
CONFIDENCE: a number between 0.0 and 1.0
REASONING: your argument, most important point first
EVIDENCE: source | fact   (optional, repeatable; shared with the other analysts)
MESSAGE: @agent_id text   (optional, repeatable; omit the @mention to address everyone)

Use NEUTRAL only when real trade-offs leave no clear preference.
If a point is a compliance or security blocker, say "blocker" explicitly."#
    }

    /// System prompt for an agent holding `perspective`
    pub fn system(perspective: &Perspective, agent_id: &str) -> String {
        format!(
            r#"You are {agent_id}, the {perspective} analyst on a decision council.
Judge the proposal strictly from the {perspective} perspective: {focus}.
Be concrete, cite evidence, and state your confidence honestly.

{format}"#,
            agent_id = agent_id,
            perspective = perspective,
            focus = perspective.focus(),
            format = Self::response_format()
        )
    }

    /// Round 1: independent analysis
    pub fn analyze(topic: &str, evidence: &[EvidenceItem], knowledge: &[String]) -> String {
        let mut prompt = format!(
            "Decision under review:\n{}\n\nRound 1 (independent analysis). Do not speculate about what other analysts think.\n",
            topic
        );
        Self::push_evidence(&mut prompt, evidence);
        Self::push_knowledge(&mut prompt, knowledge);
        prompt
    }

    /// Round 2: rebuttal after reading Round-1 analyses and inbox
    pub fn rebuttal(
        topic: &str,
        own_id: &str,
        prior: &[ArgumentRecord],
        inbox: &[Message],
        evidence: &[EvidenceItem],
        knowledge: &[String],
    ) -> String {
        let mut prompt = format!(
            "Decision under review:\n{}\n\nRound 2 (rebuttal). Here is what the council argued so far:\n",
            topic
        );
        Self::push_arguments(&mut prompt, prior, Some(own_id));
        Self::push_inbox(&mut prompt, inbox);
        Self::push_evidence(&mut prompt, evidence);
        Self::push_knowledge(&mut prompt, knowledge);
        prompt.push_str(
            "\nYou may revise your position and confidence. If you disagree with another analyst, cite them by @agent_id.\n",
        );
        prompt
    }

    /// Round 3: final position after all rebuttals
    pub fn synthesize(
        topic: &str,
        own_id: &str,
        all_arguments: &[ArgumentRecord],
        inbox: &[Message],
    ) -> String {
        let mut prompt = format!(
            "Decision under review:\n{}\n\nRound 3 (final position). Full debate so far:\n",
            topic
        );
        Self::push_arguments(&mut prompt, all_arguments, Some(own_id));
        Self::push_inbox(&mut prompt, inbox);
        prompt.push_str("\nState your final vote. This is the position the council will count.\n");
        prompt
    }

    fn push_inbox(prompt: &mut String, inbox: &[Message]) {
        if inbox.is_empty() {
            return;
        }
        prompt.push_str("\nMessages addressed to you:\n");
        for message in inbox {
            prompt.push_str(&format!("- from @{}: {}\n", message.from_agent, message.body));
        }
    }

    fn push_arguments(prompt: &mut String, arguments: &[ArgumentRecord], own_id: Option<&str>) {
        for argument in arguments {
            let marker = if Some(argument.agent_id.as_str()) == own_id {
                " (you)"
            } else {
                ""
            };
            prompt.push_str(&format!(
                "\n--- @{}{} · round {} · {} ({:.2}) ---\n{}\n",
                argument.agent_id,
                marker,
                argument.round_number,
                argument.position,
                argument.confidence,
                argument.reasoning
            ));
        }
    }

    fn push_evidence(prompt: &mut String, evidence: &[EvidenceItem]) {
        if evidence.is_empty() {
            return;
        }
        prompt.push_str("\nShared evidence:\n");
        for item in evidence {
            prompt.push_str(&format!(
                "- [{}] {} (from {})\n",
                item.source, item.content, item.collected_by
            ));
        }
    }

    fn push_knowledge(prompt: &mut String, knowledge: &[String]) {
        if knowledge.is_empty() {
            return;
        }
        prompt.push_str("\nRelevant knowledge base entries:\n");
        for entry in knowledge {
            prompt.push_str(&format!("- {}\n", entry));
        }
    }
}
