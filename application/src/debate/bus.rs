//! Message bus: direct and broadcast messages between agents.

use super::board::SharedBoard;
use crate::ports::manifest::ManifestRecorder;
use council_domain::{ManifestEventType, Message};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Per-agent inboxes plus a full message history.
///
/// A message whose target is not registered is still recorded in the
/// history and the manifest, but lands in no inbox.
#[derive(Clone)]
pub struct MessageBus {
    board: Arc<SharedBoard>,
    manifest: ManifestRecorder,
}

impl MessageBus {
    pub fn new(manifest: ManifestRecorder) -> Self {
        Self::with_board(Arc::new(SharedBoard::default()), manifest)
    }

    pub(crate) fn with_board(board: Arc<SharedBoard>, manifest: ManifestRecorder) -> Self {
        Self { board, manifest }
    }

    /// Give `agent_id` an (empty) inbox
    pub fn register(&self, agent_id: impl Into<String>) {
        self.board.lock().inboxes.entry(agent_id.into()).or_default();
    }

    /// Registered agents, sorted
    pub fn agents(&self) -> Vec<String> {
        self.board.lock().inboxes.keys().cloned().collect()
    }

    /// Send a message.
    ///
    /// With `to_agent` unset the target is taken from an `@agent_id`
    /// mention in the body; with no mention it is a broadcast to every
    /// registered agent except the sender.
    pub fn send(&self, from_agent: &str, to_agent: Option<&str>, body: impl Into<String>) -> Message {
        let message = Message::new(from_agent, to_agent.map(str::to_string), body);
        let mut state = self.board.lock();

        let mut delivered = 0usize;
        match &message.to_agent {
            Some(target) => {
                if let Some(inbox) = state.inboxes.get_mut(target) {
                    inbox.push_back(message.clone());
                    delivered = 1;
                } else {
                    debug!("{} messaged unknown agent {}", from_agent, target);
                }
            }
            None => {
                for (agent_id, inbox) in state.inboxes.iter_mut() {
                    if agent_id != from_agent {
                        inbox.push_back(message.clone());
                        delivered += 1;
                    }
                }
            }
        }

        self.manifest.log_event(
            ManifestEventType::Message,
            json!({
                "from_agent": message.from_agent,
                "to_agent": message.to_agent,
                "body": message.body,
                "delivered": delivered,
            }),
        );
        state.history.push(message.clone());
        message
    }

    /// Drain and return everything waiting for `agent_id`, oldest first
    pub fn receive(&self, agent_id: &str) -> Vec<Message> {
        self.board
            .lock()
            .inboxes
            .get_mut(agent_id)
            .map(|inbox| inbox.drain(..).collect())
            .unwrap_or_default()
    }

    /// Every message sent so far, in send order
    pub fn history(&self) -> Vec<Message> {
        self.board.lock().history.clone()
    }
}
