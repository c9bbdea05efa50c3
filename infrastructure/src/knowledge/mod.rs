//! Knowledge store adapters.

mod directory;

pub use directory::DirectoryKnowledgeStore;
