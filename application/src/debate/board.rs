//! State shared by a council's context and message bus.

use council_domain::{ArgumentRecord, EvidenceItem, Message};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub(crate) struct BoardState {
    pub arguments: Vec<ArgumentRecord>,
    pub evidence: Vec<EvidenceItem>,
    /// 0 before the first round opens
    pub round: u32,
    pub inboxes: BTreeMap<String, VecDeque<Message>>,
    pub history: Vec<Message>,
}

/// One lock guards arguments, evidence, inboxes and message history, so
/// every mutation is atomic with respect to every read.
#[derive(Debug, Default)]
pub(crate) struct SharedBoard {
    state: Mutex<BoardState>,
}

impl SharedBoard {
    /// Recovers from poisoning: a panicking agent must not wedge the council.
    pub(crate) fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
