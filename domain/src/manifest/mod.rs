//! Manifest event model: the append-only audit trail of a council.
//!
//! Events reference agents and councils by id only, never live objects,
//! so a manifest can be replayed after the process that wrote it is gone.
//!
//! On disk each event is one JSON line:
//!
//! ```text
//! {"event":"argument_posted","council_id":"COUNCIL-…","timestamp":1760600000000,"agent_id":"cost_analyst",…}
//! ```

use crate::core::now_millis;
use crate::debate::CouncilId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Kinds of lifecycle event recorded in a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestEventType {
    CouncilInit,
    AgentSpawn,
    RoundStart,
    ArgumentPosted,
    Message,
    AgentFailure,
    CouncilAborted,
    Synthesis,
    RecommendationEmitted,
}

impl ManifestEventType {
    pub const ALL: [ManifestEventType; 9] = [
        ManifestEventType::CouncilInit,
        ManifestEventType::AgentSpawn,
        ManifestEventType::RoundStart,
        ManifestEventType::ArgumentPosted,
        ManifestEventType::Message,
        ManifestEventType::AgentFailure,
        ManifestEventType::CouncilAborted,
        ManifestEventType::Synthesis,
        ManifestEventType::RecommendationEmitted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestEventType::CouncilInit => "council_init",
            ManifestEventType::AgentSpawn => "agent_spawn",
            ManifestEventType::RoundStart => "round_start",
            ManifestEventType::ArgumentPosted => "argument_posted",
            ManifestEventType::Message => "message",
            ManifestEventType::AgentFailure => "agent_failure",
            ManifestEventType::CouncilAborted => "council_aborted",
            ManifestEventType::Synthesis => "synthesis",
            ManifestEventType::RecommendationEmitted => "recommendation_emitted",
        }
    }
}

impl std::fmt::Display for ManifestEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One manifest entry: `{event, council_id, timestamp, ...payload}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEvent {
    pub event: ManifestEventType,
    pub council_id: CouncilId,
    /// Milliseconds since epoch
    pub timestamp: u64,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ManifestEvent {
    /// Create an event stamped with the current time.
    ///
    /// Object payloads are flattened into the event; anything else is kept
    /// under a `data` key.
    pub fn new(event: ManifestEventType, council_id: CouncilId, payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        Self {
            event,
            council_id,
            timestamp: now_millis(),
            payload,
        }
    }

    /// Read a payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Round number carried in the payload, if any
    pub fn round(&self) -> Option<u32> {
        self.get("round").and_then(Value::as_u64).map(|r| r as u32)
    }
}

/// Event counts per type for one council
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestStats {
    pub counts: BTreeMap<ManifestEventType, usize>,
}

impl ManifestStats {
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a ManifestEvent>) -> Self {
        let mut counts = BTreeMap::new();
        for event in events {
            *counts.entry(event.event).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, event: ManifestEventType) -> usize {
        self.counts.get(&event).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serializes_flat() {
        let event = ManifestEvent::new(
            ManifestEventType::RoundStart,
            CouncilId::from("COUNCIL-1"),
            json!({"round": 2}),
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "round_start");
        assert_eq!(value["council_id"], "COUNCIL-1");
        assert_eq!(value["round"], 2);
        assert!(value["timestamp"].is_u64());
        assert_eq!(event.round(), Some(2));
    }

    #[test]
    fn test_event_parses_back_from_line() {
        let line = r#"{"event":"agent_spawn","council_id":"C","timestamp":5,"agent_id":"cost_analyst"}"#;
        let event: ManifestEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.event, ManifestEventType::AgentSpawn);
        assert_eq!(event.timestamp, 5);
        assert_eq!(event.get("agent_id"), Some(&json!("cost_analyst")));
    }

    #[test]
    fn test_non_object_payload_goes_under_data() {
        let event = ManifestEvent::new(
            ManifestEventType::Synthesis,
            CouncilId::from("C"),
            json!("done"),
        );
        assert_eq!(event.get("data"), Some(&json!("done")));
    }

    #[test]
    fn test_stats_counts() {
        let id = CouncilId::from("C");
        let events = vec![
            ManifestEvent::new(ManifestEventType::AgentSpawn, id.clone(), Value::Null),
            ManifestEvent::new(ManifestEventType::AgentSpawn, id.clone(), Value::Null),
            ManifestEvent::new(ManifestEventType::RoundStart, id, Value::Null),
        ];
        let stats = ManifestStats::from_events(&events);
        assert_eq!(stats.count(ManifestEventType::AgentSpawn), 2);
        assert_eq!(stats.count(ManifestEventType::Synthesis), 0);
        assert_eq!(stats.total(), 3);
    }
}
