//! Infrastructure layer for agent-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: manifest storage on disk, configuration
//! file loading, an HTTP reasoning provider and a directory-backed
//! knowledge store.

pub mod config;
pub mod knowledge;
pub mod manifest;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig, Severity,
};
pub use knowledge::DirectoryKnowledgeStore;
pub use manifest::{JsonlManifest, ManifestReadError};
pub use providers::{OpenAiCompatibleProvider, OpenAiSettings};
