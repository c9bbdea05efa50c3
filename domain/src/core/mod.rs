//! Core domain concepts shared across all subdomains.
//!
//! - [`topic::Topic`] — a validated decision topic put to the council
//! - [`error::DomainError`] — domain-level errors
//! - [`text`] — sentence and similarity helpers

pub mod error;
pub mod text;
pub mod topic;

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
