//! The agent abstraction and the capabilities an agent gets from its council.

use crate::debate::{DebateContext, MessageBus};
use crate::governance::SpendMeter;
use crate::ports::knowledge::{KnowledgeEntry, KnowledgeStore, NoKnowledge};
use crate::ports::reasoning::ReasoningError;
use async_trait::async_trait;
use council_domain::{
    ArgumentDraft, ArgumentRecord, EvidenceItem, Message, Perspective, Topic,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why an agent produced no argument for a round
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Reasoning failed: {0}")]
    Reasoning(#[from] ReasoningError),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

/// A debate participant.
///
/// Agents return an [`ArgumentDraft`]; the orchestrator stamps it with the
/// agent's id, perspective and the current round before posting it, so an
/// agent can never post for someone else or into another round.
#[async_trait]
pub trait DebateAgent: Send + Sync {
    /// Round 1: independent analysis
    async fn analyze(&self, topic: &Topic, ctx: &AgentHandle) -> Result<ArgumentDraft, AgentError>;

    /// Round 2: respond to the Round-1 analyses (and any inbox messages)
    async fn rebuttal(
        &self,
        topic: &Topic,
        ctx: &AgentHandle,
        prior_arguments: &[ArgumentRecord],
    ) -> Result<ArgumentDraft, AgentError>;

    /// Round 3: final vote given the whole debate
    async fn synthesize(
        &self,
        topic: &Topic,
        ctx: &AgentHandle,
        all_arguments: &[ArgumentRecord],
    ) -> Result<ArgumentDraft, AgentError>;
}

/// An agent's view of its council.
///
/// Every helper acts under the agent's own id: evidence is attributed to
/// it, messages are sent from it and only its own inbox can be read.
#[derive(Clone)]
pub struct AgentHandle {
    agent_id: String,
    perspective: Perspective,
    context: DebateContext,
    bus: MessageBus,
    knowledge: Arc<dyn KnowledgeStore>,
    spend: SpendMeter,
}

impl AgentHandle {
    pub fn new(
        agent_id: impl Into<String>,
        perspective: Perspective,
        context: DebateContext,
        bus: MessageBus,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            perspective,
            context,
            bus,
            knowledge: Arc::new(NoKnowledge),
            spend: SpendMeter::unmetered(),
        }
    }

    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeStore>) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_spend_meter(mut self, spend: SpendMeter) -> Self {
        self.spend = spend;
        self
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }

    pub fn current_round(&self) -> u32 {
        self.context.current_round()
    }

    /// Stamp a draft for the current round and post it.
    ///
    /// Only the orchestrator posts: an agent hands back its draft instead.
    pub(crate) fn post_argument(&self, draft: ArgumentDraft) -> ArgumentRecord {
        let record = ArgumentRecord::new(
            self.agent_id.clone(),
            self.perspective.clone(),
            self.context.current_round(),
            draft,
        );
        self.context.post_argument(record.clone());
        record
    }

    /// Arguments visible to this agent.
    ///
    /// While Round 1 is open only the agent's own records are returned:
    /// initial analyses are independent.
    pub fn arguments(&self, round: Option<u32>) -> Vec<ArgumentRecord> {
        let records = self.context.get_arguments(round);
        if self.context.current_round() <= 1 {
            records
                .into_iter()
                .filter(|r| r.agent_id == self.agent_id)
                .collect()
        } else {
            records
        }
    }

    pub fn add_evidence(&self, source: impl Into<String>, content: impl Into<String>) {
        self.context
            .add_evidence(EvidenceItem::new(source, content, self.agent_id.clone()));
    }

    pub fn evidence(&self) -> Vec<EvidenceItem> {
        self.context.get_evidence()
    }

    /// Send from this agent (see [`MessageBus::send`] for routing)
    pub fn send_message(&self, to_agent: Option<&str>, body: impl Into<String>) -> Message {
        self.bus.send(&self.agent_id, to_agent, body)
    }

    /// Drain this agent's inbox
    pub fn read_messages(&self) -> Vec<Message> {
        self.bus.receive(&self.agent_id)
    }

    pub fn lookup_knowledge(&self, query: &str, limit: usize) -> Vec<KnowledgeEntry> {
        self.knowledge.lookup(query, limit)
    }

    /// Charge reasoning spend to this debate
    pub fn record_spend(&self, usd: f64) {
        self.spend.record(usd);
    }
}
