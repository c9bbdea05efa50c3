//! Domain layer for agent-council
//!
//! This crate contains the debate records, the manifest event model and the
//! vote aggregation rules. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! One three-round debate over a single topic. Each agent holds one
//! [`Perspective`] and posts one [`ArgumentRecord`] per round:
//!
//! 1. **Analyze**: independent analysis (no peeking at other agents)
//! 2. **Rebut**: sequential rebuttals that may cite earlier agents
//! 3. **Synthesize**: final positions, which are the votes
//!
//! ## Verdict
//!
//! [`VoteAggregator`] is a pure function from final arguments to a
//! [`DebateResult`] (`ADOPT`, `REJECT`, `CONDITIONAL` or `SPLIT`).
//!
//! ## Manifest
//!
//! [`ManifestEvent`]s form the append-only audit trail of a council.

pub mod config;
pub mod core;
pub mod debate;
pub mod manifest;
pub mod prompt;
pub mod verdict;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, now_millis, topic::Topic};
pub use debate::{
    AbortReason, ArgumentDraft, ArgumentRecord, CouncilId, CouncilState, EvidenceItem, Message,
    Perspective, Position, clamp_confidence, parse_mention,
};
pub use manifest::{ManifestEvent, ManifestEventType, ManifestStats};
pub use prompt::CouncilPromptTemplate;
pub use verdict::{
    DebateResult, ParsedArgument, Recommendation, VoteAggregator, VoteBreakdown,
    parse_argument_response,
};
