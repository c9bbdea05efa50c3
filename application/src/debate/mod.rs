//! Shared debate state: the argument/evidence context and the message bus.

mod board;
pub mod bus;
pub mod context;

pub use bus::MessageBus;
pub use context::DebateContext;

use crate::ports::manifest::ManifestRecorder;
use board::SharedBoard;
use std::sync::Arc;

/// Context and bus for one council, guarded by a single lock
pub fn debate_channels(manifest: ManifestRecorder) -> (DebateContext, MessageBus) {
    let board = Arc::new(SharedBoard::default());
    (
        DebateContext::with_board(board.clone(), manifest.clone()),
        MessageBus::with_board(board, manifest),
    )
}
