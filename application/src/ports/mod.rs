//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod knowledge;
pub mod manifest;
pub mod progress;
pub mod reasoning;
