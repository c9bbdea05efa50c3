//! Port for the debate manifest.
//!
//! Defines the [`DebateManifest`] trait: an append-only, per-council record
//! of lifecycle events. This is separate from `tracing`-based operation
//! logs: tracing carries human-readable diagnostics, the manifest carries
//! the audit trail in a machine-readable form that can be replayed.
//!
//! Writers never see I/O failures. `log_event` is synchronous and
//! non-fallible so a broken sink cannot stop a debate; adapters report
//! write problems through `tracing` instead.

use council_domain::{CouncilId, ManifestEvent, ManifestEventType, ManifestStats};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

/// Append-only event store keyed by council
pub trait DebateManifest: Send + Sync {
    /// Append one event.
    fn log_event(&self, event: ManifestEvent);

    /// Every event recorded for `council_id`, in append order.
    fn timeline(&self, council_id: &CouncilId) -> Vec<ManifestEvent>;

    /// Event counts per type for `council_id`.
    fn stats(&self, council_id: &CouncilId) -> ManifestStats {
        ManifestStats::from_events(&self.timeline(council_id))
    }

    /// Where this council's manifest can be found (e.g. a file path).
    fn reference(&self, _council_id: &CouncilId) -> Option<String> {
        None
    }
}

/// No-op manifest for when recording is disabled.
pub struct NoManifest;

impl DebateManifest for NoManifest {
    fn log_event(&self, _event: ManifestEvent) {}

    fn timeline(&self, _council_id: &CouncilId) -> Vec<ManifestEvent> {
        Vec::new()
    }
}

/// Manifest held in memory, used by tests and by `--no-manifest` runs
/// that still want a timeline at the end.
#[derive(Default)]
pub struct InMemoryManifest {
    events: Mutex<Vec<ManifestEvent>>,
}

impl InMemoryManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events across all councils
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DebateManifest for InMemoryManifest {
    fn log_event(&self, event: ManifestEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn timeline(&self, council_id: &CouncilId) -> Vec<ManifestEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| &e.council_id == council_id)
            .cloned()
            .collect()
    }
}

/// A manifest sink bound to one council.
///
/// Shared (cheaply cloned) between the orchestrator, the debate context and
/// the message bus so each can record the events it owns.
#[derive(Clone)]
pub struct ManifestRecorder {
    council_id: CouncilId,
    sink: Arc<dyn DebateManifest>,
}

impl ManifestRecorder {
    pub fn new(council_id: CouncilId, sink: Arc<dyn DebateManifest>) -> Self {
        Self { council_id, sink }
    }

    /// A recorder that drops every event
    pub fn disabled() -> Self {
        Self::new(CouncilId::from("COUNCIL-UNRECORDED"), Arc::new(NoManifest))
    }

    pub fn council_id(&self) -> &CouncilId {
        &self.council_id
    }

    pub fn log_event(&self, event: ManifestEventType, payload: Value) {
        self.sink
            .log_event(ManifestEvent::new(event, self.council_id.clone(), payload));
    }

    pub fn timeline(&self) -> Vec<ManifestEvent> {
        self.sink.timeline(&self.council_id)
    }

    pub fn stats(&self) -> ManifestStats {
        self.sink.stats(&self.council_id)
    }

    /// Sink-specific location, falling back to the council id
    pub fn reference(&self) -> String {
        self.sink
            .reference(&self.council_id)
            .unwrap_or_else(|| self.council_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_memory_timeline_is_per_council() {
        let sink = Arc::new(InMemoryManifest::new());
        let a = ManifestRecorder::new(CouncilId::from("A"), sink.clone());
        let b = ManifestRecorder::new(CouncilId::from("B"), sink.clone());

        a.log_event(ManifestEventType::CouncilInit, json!({"topic": "x"}));
        b.log_event(ManifestEventType::CouncilInit, json!({"topic": "y"}));
        a.log_event(ManifestEventType::RoundStart, json!({"round": 1}));

        assert_eq!(sink.len(), 3);
        let timeline = a.timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].event, ManifestEventType::CouncilInit);
        assert_eq!(timeline[1].round(), Some(1));
        assert_eq!(b.stats().total(), 1);
    }

    #[test]
    fn test_reference_falls_back_to_council_id() {
        let recorder = ManifestRecorder::new(CouncilId::from("C-1"), Arc::new(InMemoryManifest::new()));
        assert_eq!(recorder.reference(), "C-1");
    }

    #[test]
    fn test_disabled_recorder_keeps_nothing() {
        let recorder = ManifestRecorder::disabled();
        recorder.log_event(ManifestEventType::Message, Value::Null);
        assert!(recorder.timeline().is_empty());
    }
}
