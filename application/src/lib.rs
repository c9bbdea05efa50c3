//! Application layer for agent-council
//!
//! This crate contains the council orchestrator, the shared debate state,
//! agent abstractions, governance controls and port definitions.
//! It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod debate;
pub mod governance;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{
    AgentError, AgentHandle, AgentRegistry, DebateAgent, PerspectiveAgent, RoundScript,
    ScriptedAgent,
};
pub use config::CouncilParams;
pub use debate::{DebateContext, MessageBus, debate_channels};
pub use governance::{CouncilLimiter, SpendLedger, SpendMeter};
pub use ports::{
    knowledge::{KnowledgeEntry, KnowledgeStore, NoKnowledge},
    manifest::{DebateManifest, InMemoryManifest, ManifestRecorder, NoManifest},
    progress::{CouncilProgressNotifier, NoProgress},
    reasoning::{ReasoningError, ReasoningProvider, ReasoningRequest, ReasoningResponse},
};
pub use use_cases::run_council::{
    BackgroundDoc, CouncilOrchestrator, InitiateDebateError, InitiateDebateInput, ORCHESTRATOR_ID,
};
