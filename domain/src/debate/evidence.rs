//! Shared evidence pool entries

use crate::core::now_millis;
use serde::{Deserialize, Serialize};

/// A piece of evidence visible to every agent in the debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Where the evidence came from (document, URL, knowledge entry)
    pub source: String,
    pub content: String,
    /// Agent id that collected it (`orchestrator` for background docs)
    pub collected_by: String,
    pub timestamp: u64,
}

impl EvidenceItem {
    pub fn new(
        source: impl Into<String>,
        content: impl Into<String>,
        collected_by: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            collected_by: collected_by.into(),
            timestamp: now_millis(),
        }
    }
}
