//! Deterministic agent with predetermined behaviour per round.
//!
//! Used by tests and by `--dry-run` to exercise the orchestrator without a
//! reasoning backend.

use super::agent::{AgentError, AgentHandle, DebateAgent};
use async_trait::async_trait;
use council_domain::{ArgumentDraft, ArgumentRecord, Position, Topic};
use std::time::Duration;

/// What a scripted agent does in one round
#[derive(Debug, Clone)]
pub struct RoundScript {
    pub position: Position,
    pub confidence: f64,
    /// Generated from the agent id and position when unset
    pub reasoning: Option<String>,
    pub delay: Duration,
    /// Fail the round with this message instead of answering
    pub failure: Option<String>,
    pub cost_usd: f64,
    pub messages: Vec<String>,
    /// `(source, content)`
    pub evidence: Vec<(String, String)>,
}

impl RoundScript {
    pub fn new(position: Position, confidence: f64) -> Self {
        Self {
            position,
            confidence,
            reasoning: None,
            delay: Duration::ZERO,
            failure: None,
            cost_usd: 0.0,
            messages: Vec::new(),
            evidence: Vec::new(),
        }
    }
}

/// An agent that plays back a script.
///
/// ```
/// use council_application::agents::ScriptedAgent;
/// use council_domain::Position;
/// use std::time::Duration;
///
/// // supports throughout, but stalls in round 1
/// let agent = ScriptedAgent::new(Position::Support, 0.8)
///     .with_delay(1, Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    rounds: [RoundScript; 3],
}

impl ScriptedAgent {
    /// Same position and confidence in every round
    pub fn new(position: Position, confidence: f64) -> Self {
        let script = RoundScript::new(position, confidence);
        Self {
            rounds: [script.clone(), script.clone(), script],
        }
    }

    /// Fails every round with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let mut agent = Self::new(Position::Neutral, 0.0);
        for round in 1..=3 {
            agent = agent.with_failure(round, reason.clone());
        }
        agent
    }

    /// Replace the script for `round` (1 to 3)
    pub fn with_round(mut self, round: u32, script: RoundScript) -> Self {
        if let Some(slot) = Self::slot(round) {
            self.rounds[slot] = script;
        }
        self
    }

    pub fn with_position(mut self, round: u32, position: Position, confidence: f64) -> Self {
        self.edit(round, |s| {
            s.position = position;
            s.confidence = confidence;
        });
        self
    }

    pub fn with_reasoning(mut self, round: u32, reasoning: impl Into<String>) -> Self {
        let reasoning = reasoning.into();
        self.edit(round, |s| s.reasoning = Some(reasoning));
        self
    }

    pub fn with_delay(mut self, round: u32, delay: Duration) -> Self {
        self.edit(round, |s| s.delay = delay);
        self
    }

    pub fn with_failure(mut self, round: u32, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        self.edit(round, |s| s.failure = Some(reason));
        self
    }

    pub fn with_cost(mut self, round: u32, usd: f64) -> Self {
        self.edit(round, |s| s.cost_usd = usd);
        self
    }

    pub fn with_message(mut self, round: u32, body: impl Into<String>) -> Self {
        let body = body.into();
        self.edit(round, |s| s.messages.push(body));
        self
    }

    pub fn with_evidence(
        mut self,
        round: u32,
        source: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let item = (source.into(), content.into());
        self.edit(round, |s| s.evidence.push(item));
        self
    }

    pub fn script(&self, round: u32) -> Option<&RoundScript> {
        Self::slot(round).map(|i| &self.rounds[i])
    }

    fn slot(round: u32) -> Option<usize> {
        (1..=3).contains(&round).then(|| round as usize - 1)
    }

    fn edit(&mut self, round: u32, f: impl FnOnce(&mut RoundScript)) {
        if let Some(slot) = Self::slot(round) {
            f(&mut self.rounds[slot]);
        }
    }

    async fn play(
        &self,
        round: u32,
        ctx: &AgentHandle,
        cite: Option<&str>,
    ) -> Result<ArgumentDraft, AgentError> {
        let script = self
            .script(round)
            .ok_or_else(|| AgentError::Other(format!("no script for round {}", round)))?;

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        ctx.record_spend(script.cost_usd);
        if let Some(reason) = &script.failure {
            return Err(AgentError::Other(reason.clone()));
        }

        for (source, content) in &script.evidence {
            ctx.add_evidence(source.clone(), content.clone());
        }
        for body in &script.messages {
            ctx.send_message(None, body.clone());
        }

        let reasoning = script.reasoning.clone().unwrap_or_else(|| {
            let stance = format!(
                "{} holds {} in round {}.",
                ctx.agent_id(),
                script.position,
                round
            );
            match cite {
                Some(other) => format!("Responding to @{}: {}", other, stance),
                None => stance,
            }
        });
        Ok(ArgumentDraft::new(script.position, reasoning, script.confidence))
    }
}

#[async_trait]
impl DebateAgent for ScriptedAgent {
    async fn analyze(&self, _topic: &Topic, ctx: &AgentHandle) -> Result<ArgumentDraft, AgentError> {
        self.play(1, ctx, None).await
    }

    async fn rebuttal(
        &self,
        _topic: &Topic,
        ctx: &AgentHandle,
        prior_arguments: &[ArgumentRecord],
    ) -> Result<ArgumentDraft, AgentError> {
        let own = self.script(2).map(|s| s.position);
        // cite the first peer we disagree with
        let cite = prior_arguments
            .iter()
            .find(|a| a.agent_id != ctx.agent_id() && Some(a.position) != own)
            .map(|a| a.agent_id.as_str());
        self.play(2, ctx, cite).await
    }

    async fn synthesize(
        &self,
        _topic: &Topic,
        ctx: &AgentHandle,
        _all_arguments: &[ArgumentRecord],
    ) -> Result<ArgumentDraft, AgentError> {
        self.play(3, ctx, None).await
    }
}
