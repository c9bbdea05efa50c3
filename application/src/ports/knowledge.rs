//! Knowledge store port
//!
//! Read-only lookup of reference material (runbooks, prior decisions,
//! vendor notes) that agents may cite while analyzing a topic.

/// One matching passage
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeEntry {
    /// Where the passage came from (file name, URL, ...)
    pub source: String,
    pub excerpt: String,
}

impl KnowledgeEntry {
    pub fn new(source: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            excerpt: excerpt.into(),
        }
    }
}

impl std::fmt::Display for KnowledgeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source, self.excerpt)
    }
}

/// Lookup interface for reference material
pub trait KnowledgeStore: Send + Sync {
    /// Up to `limit` passages relevant to `query`, best first.
    fn lookup(&self, query: &str, limit: usize) -> Vec<KnowledgeEntry>;
}

/// Store with no content
pub struct NoKnowledge;

impl KnowledgeStore for NoKnowledge {
    fn lookup(&self, _query: &str, _limit: usize) -> Vec<KnowledgeEntry> {
        Vec::new()
    }
}
