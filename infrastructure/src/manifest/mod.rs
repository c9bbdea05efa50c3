//! Manifest storage.
//!
//! Provides [`JsonlManifest`], a per-council JSONL store that implements
//! the [`DebateManifest`](council_application::DebateManifest) port.

mod jsonl_manifest;

pub use jsonl_manifest::{JsonlManifest, ManifestReadError};
