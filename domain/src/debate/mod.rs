//! Debate records exchanged between agents.
//!
//! Everything here is plain data: agents produce [`ArgumentDraft`]s, the
//! orchestrator stamps them into [`ArgumentRecord`]s, and both the evidence
//! pool and the message bus carry [`EvidenceItem`]s and [`Message`]s.

pub mod argument;
pub mod council;
pub mod evidence;
pub mod message;
pub mod perspective;
pub mod position;

pub use argument::{ArgumentDraft, ArgumentRecord, clamp_confidence};
pub use council::{AbortReason, CouncilId, CouncilState};
pub use evidence::EvidenceItem;
pub use message::{Message, parse_mention};
pub use perspective::Perspective;
pub use position::Position;
