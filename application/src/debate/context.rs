//! Debate context: the shared record of arguments and evidence.

use super::board::SharedBoard;
use crate::ports::manifest::ManifestRecorder;
use council_domain::{ArgumentRecord, EvidenceItem, ManifestEventType};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Shared argument and evidence store for one council.
///
/// Cloning yields another handle onto the same state. Arguments are
/// append-only: nothing here can edit or remove a posted record.
#[derive(Clone)]
pub struct DebateContext {
    board: Arc<SharedBoard>,
    manifest: ManifestRecorder,
}

impl DebateContext {
    /// Context with its own state (see [`super::debate_channels`] for a
    /// context/bus pair sharing one lock)
    pub fn new(manifest: ManifestRecorder) -> Self {
        Self::with_board(Arc::new(SharedBoard::default()), manifest)
    }

    pub(crate) fn with_board(board: Arc<SharedBoard>, manifest: ManifestRecorder) -> Self {
        Self { board, manifest }
    }

    /// Append a record and write `argument_posted` to the manifest.
    ///
    /// The manifest write happens under the lock, so the manifest order
    /// matches the context order.
    pub fn post_argument(&self, record: ArgumentRecord) {
        let mut state = self.board.lock();
        debug!(
            "{} posted {} ({:.2}) in round {}",
            record.agent_id, record.position, record.confidence, record.round_number
        );
        self.manifest.log_event(
            ManifestEventType::ArgumentPosted,
            json!({
                "agent_id": record.agent_id,
                "perspective": record.perspective,
                "round": record.round_number,
                "position": record.position,
                "confidence": record.confidence,
                "reasoning": record.reasoning,
            }),
        );
        state.arguments.push(record);
    }

    /// Arguments in posting order, optionally limited to one round
    pub fn get_arguments(&self, round: Option<u32>) -> Vec<ArgumentRecord> {
        let state = self.board.lock();
        match round {
            Some(r) => state
                .arguments
                .iter()
                .filter(|a| a.round_number == r)
                .cloned()
                .collect(),
            None => state.arguments.clone(),
        }
    }

    pub fn argument_count(&self) -> usize {
        self.board.lock().arguments.len()
    }

    pub fn add_evidence(&self, item: EvidenceItem) {
        debug!("{} added evidence from {}", item.collected_by, item.source);
        self.board.lock().evidence.push(item);
    }

    /// Every evidence item, visible to all agents
    pub fn get_evidence(&self) -> Vec<EvidenceItem> {
        self.board.lock().evidence.clone()
    }

    pub fn current_round(&self) -> u32 {
        self.board.lock().round
    }

    /// Open the next round. Only the orchestrator moves rounds forward.
    pub(crate) fn advance_round(&self) -> u32 {
        let mut state = self.board.lock();
        state.round += 1;
        state.round
    }
}
