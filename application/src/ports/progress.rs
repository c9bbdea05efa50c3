//! Progress notification port
//!
//! Defines the interface for reporting progress while a council runs.

use council_domain::{AbortReason, CouncilId, Recommendation};

/// Callback for progress updates during a council
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, ...).
pub trait CouncilProgressNotifier: Send + Sync {
    /// Called once agents are spawned
    fn on_council_start(&self, _council_id: &CouncilId, _agents: usize) {}

    /// Called when a round starts
    fn on_round_start(&self, round: u32, total_agents: usize);

    /// Called when one agent's contribution to a round is settled
    fn on_agent_complete(&self, round: u32, agent_id: &str, success: bool);

    /// Called when every agent has posted for the round
    fn on_round_complete(&self, round: u32);

    /// Called when the council stops early
    fn on_council_aborted(&self, _reason: &AbortReason) {}

    /// Called after the recommendation is emitted
    fn on_recommendation(&self, _recommendation: Recommendation, _confidence: f64) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CouncilProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: u32, _total_agents: usize) {}
    fn on_agent_complete(&self, _round: u32, _agent_id: &str, _success: bool) {}
    fn on_round_complete(&self, _round: u32) {}
}
